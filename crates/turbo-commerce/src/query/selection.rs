//! GraphQL selection sets.

/// A GraphQL argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Int(i64),
    Bool(bool),
    /// An input object, rendered with fields in insertion order.
    Object(Vec<(String, ArgValue)>),
}

impl ArgValue {
    /// Build an input object from `(name, value)` pairs.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, ArgValue)>) -> Self {
        ArgValue::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    fn render(&self, out: &mut String) {
        match self {
            // JSON string escaping is a valid GraphQL string literal.
            ArgValue::String(s) => out.push_str(&serde_json::Value::from(s.as_str()).to_string()),
            ArgValue::Int(i) => out.push_str(&i.to_string()),
            ArgValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            ArgValue::Object(fields) => {
                out.push('{');
                render_arguments(fields, out);
                out.push('}');
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::String(s)
    }
}

impl From<i64> for ArgValue {
    fn from(i: i64) -> Self {
        ArgValue::Int(i)
    }
}

impl From<u32> for ArgValue {
    fn from(i: u32) -> Self {
        ArgValue::Int(i64::from(i))
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

fn render_arguments(args: &[(String, ArgValue)], out: &mut String) {
    for (i, (name, value)) in args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(name);
        out.push(':');
        value.render(out);
    }
}

/// A selected field, with optional arguments and sub-selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub args: Vec<(String, ArgValue)>,
    pub selection: SelectionSet,
}

/// One entry of a selection set.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Field(Field),
    /// `... on TypeName { ... }`
    InlineFragment {
        type_condition: String,
        selection: SelectionSet,
    },
}

/// An ordered GraphQL selection set.
///
/// Selecting a field that is already selected without arguments reuses the
/// existing entry, so hooks can safely re-select default fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    items: Vec<Selection>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Selection] {
        &self.items
    }

    /// Select a scalar field.
    pub fn field(&mut self, name: &str) -> &mut Self {
        self.merge_field(name, |_| {});
        self
    }

    /// Select a field whose name is not part of the known schema, such as a
    /// custom product attribute.
    pub fn add_custom_field(&mut self, name: &str) -> &mut Self {
        self.field(name)
    }

    /// Select an object field and populate its sub-selection.
    pub fn field_with(&mut self, name: &str, build: impl FnOnce(&mut SelectionSet)) -> &mut Self {
        self.merge_field(name, build);
        self
    }

    /// Select a field with arguments. Fields with arguments are never merged.
    pub fn field_with_args(
        &mut self,
        name: &str,
        args: Vec<(String, ArgValue)>,
        build: impl FnOnce(&mut SelectionSet),
    ) -> &mut Self {
        let mut selection = SelectionSet::new();
        build(&mut selection);
        self.items.push(Selection::Field(Field {
            name: name.to_string(),
            args,
            selection,
        }));
        self
    }

    /// Select fields only present on the given concrete type.
    pub fn on(&mut self, type_condition: &str, build: impl FnOnce(&mut SelectionSet)) -> &mut Self {
        let position = self.items.iter().position(|item| {
            matches!(item, Selection::InlineFragment { type_condition: t, .. } if t == type_condition)
        });
        let index = match position {
            Some(index) => index,
            None => {
                self.items.push(Selection::InlineFragment {
                    type_condition: type_condition.to_string(),
                    selection: SelectionSet::new(),
                });
                self.items.len() - 1
            }
        };
        if let Selection::InlineFragment { selection, .. } = &mut self.items[index] {
            build(selection);
        }
        self
    }

    /// Whether a field with this name is selected at this level.
    pub fn contains(&self, name: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Selection::Field(f) if f.name == name))
    }

    /// Names of the fields selected at this level, in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Selection::Field(f) => Some(f.name.as_str()),
                Selection::InlineFragment { .. } => None,
            })
            .collect()
    }

    /// The sub-selection of a field selected at this level.
    pub fn get(&self, name: &str) -> Option<&SelectionSet> {
        self.items.iter().find_map(|item| match item {
            Selection::Field(f) if f.name == name => Some(&f.selection),
            _ => None,
        })
    }

    /// Render as a GraphQL selection, e.g. `{sku name}`.
    pub fn to_graphql(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }

    pub(crate) fn render(&self, out: &mut String) {
        out.push('{');
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match item {
                Selection::Field(field) => {
                    out.push_str(&field.name);
                    if !field.args.is_empty() {
                        out.push('(');
                        render_arguments(&field.args, out);
                        out.push(')');
                    }
                    if !field.selection.is_empty() {
                        field.selection.render(out);
                    }
                }
                Selection::InlineFragment {
                    type_condition,
                    selection,
                } => {
                    out.push_str("... on ");
                    out.push_str(type_condition);
                    selection.render(out);
                }
            }
        }
        out.push('}');
    }

    /// Build into the argument-less field `name`, appending it when absent.
    fn merge_field(&mut self, name: &str, build: impl FnOnce(&mut SelectionSet)) {
        let existing = self.items.iter_mut().find_map(|item| match item {
            Selection::Field(field) if field.name == name && field.args.is_empty() => Some(field),
            _ => None,
        });
        match existing {
            Some(field) => build(&mut field.selection),
            None => {
                let mut selection = SelectionSet::new();
                build(&mut selection);
                self.items.push(Selection::Field(Field {
                    name: name.to_string(),
                    args: Vec::new(),
                    selection,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_fields_render_in_order() {
        let mut set = SelectionSet::new();
        set.field("sku").field("name").field("url_key");
        assert_eq!(set.to_graphql(), "{sku name url_key}");
        assert_eq!(set.field_names(), vec!["sku", "name", "url_key"]);
    }

    #[test]
    fn test_duplicate_fields_are_merged() {
        let mut set = SelectionSet::new();
        set.field("sku")
            .field_with("image", |i| {
                i.field("url");
            })
            .field("sku")
            .field_with("image", |i| {
                i.field("label");
            });
        assert_eq!(set.to_graphql(), "{sku image{url label}}");
    }

    #[test]
    fn test_inline_fragment() {
        let mut set = SelectionSet::new();
        set.field("sku").on("ConfigurableProduct", |cp| {
            cp.field_with("variants", |v| {
                v.field_with("product", |p| {
                    p.field("sku");
                });
            });
        });
        assert_eq!(
            set.to_graphql(),
            "{sku ... on ConfigurableProduct{variants{product{sku}}}}"
        );
    }

    #[test]
    fn test_arguments_render() {
        let mut set = SelectionSet::new();
        set.field_with_args(
            "products",
            vec![(
                "filter".to_string(),
                ArgValue::object([("sku", ArgValue::object([("eq", ArgValue::from("A\"B"))]))]),
            )],
            |p| {
                p.field_with("items", |i| {
                    i.field("sku");
                });
            },
        );
        assert_eq!(
            set.to_graphql(),
            r#"{products(filter:{sku:{eq:"A\"B"}}){items{sku}}}"#
        );
    }

    #[test]
    fn test_fields_with_args_are_not_merged() {
        let mut set = SelectionSet::new();
        set.field_with_args("products", vec![("pageSize".to_string(), ArgValue::from(6i64))], |_| {})
            .field("products");
        assert_eq!(set.to_graphql(), "{products(pageSize:6) products}");
    }

    #[test]
    fn test_get_and_contains() {
        let mut set = SelectionSet::new();
        set.field_with("price_range", |p| {
            p.field("minimum_price");
        });
        assert!(set.contains("price_range"));
        assert!(!set.contains("sku"));
        assert!(set.get("price_range").unwrap().contains("minimum_price"));
    }

    #[test]
    fn test_scalar_arguments_render() {
        let mut set = SelectionSet::new();
        set.field("products");
        set.field_with_args(
            "categoryList",
            vec![
                ("currentPage".to_string(), ArgValue::from(2u32)),
                ("inStock".to_string(), ArgValue::from(true)),
                ("offset".to_string(), ArgValue::from(-3i64)),
            ],
            |c| {
                c.field("uid");
            },
        );
        set.field_with("products", |p| {
            p.field("sku");
        });
        assert_eq!(
            set.to_graphql(),
            "{products{sku} categoryList(currentPage:2,inStock:true,offset:-3){uid}}"
        );
    }
}
