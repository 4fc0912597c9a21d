use crate::error::{ModelError, ModelResult};
use crate::types::PropertyType;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One named, typed field of a class.
///
/// `name` is the JSON key as it appeared in the samples. Writers derive
/// the rendered identifier from it and keep the key for serialization glue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PropertyType,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// One generated class with its properties in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    name: String,
    #[serde(default)]
    properties: Vec<Property>,
}

impl ClassModel {
    pub fn builder(name: impl Into<String>) -> ClassModelBuilder {
        ClassModelBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Distinct nested classes referenced by this class, in first-seen order
    pub fn nested_classes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.properties
            .iter()
            .flat_map(|p| p.ty.referenced_classes())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Structural equality: same property names and types, in the same
    /// order. The class name is ignored.
    pub fn same_shape(&self, other: &ClassModel) -> bool {
        self.properties == other.properties
    }

    /// Check the invariants local to one class
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyClassName);
        }

        let mut seen = HashSet::new();
        for property in &self.properties {
            if property.name.is_empty() {
                return Err(ModelError::EmptyPropertyName {
                    class: self.name.clone(),
                });
            }
            if !seen.insert(property.name.as_str()) {
                return Err(ModelError::DuplicateProperty {
                    class: self.name.clone(),
                    property: property.name.clone(),
                });
            }
        }

        Ok(())
    }

    pub(crate) fn with_renamed_references(&self, renames: &HashMap<String, String>) -> ClassModel {
        ClassModel {
            name: self.name.clone(),
            properties: self
                .properties
                .iter()
                .map(|p| Property::new(p.name.clone(), p.ty.rename_classes(renames)))
                .collect(),
        }
    }
}

/// Incremental construction of a [`ClassModel`] from inference results
#[derive(Debug, Clone)]
pub struct ClassModelBuilder {
    name: String,
    properties: Vec<Property>,
}

impl ClassModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Append a property. Duplicates are reported by [`build`](Self::build).
    pub fn property(mut self, name: impl Into<String>, ty: PropertyType) -> Self {
        self.properties.push(Property::new(name, ty));
        self
    }

    /// Record one more observation of a property, widening its type when
    /// it was already seen. First-seen order is kept.
    pub fn observe_property(&mut self, name: &str, ty: PropertyType) -> &mut Self {
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                existing.ty = PropertyType::widen(&existing.ty, &ty);
            }
            None => self.properties.push(Property::new(name, ty)),
        }
        self
    }

    pub fn build(self) -> ModelResult<ClassModel> {
        let class = ClassModel {
            name: self.name,
            properties: self.properties,
        };
        class.validate()?;
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_insertion_order() {
        let class = ClassModel::builder("Person")
            .property("name", PropertyType::String)
            .property("age", PropertyType::Integer)
            .property("email", PropertyType::optional(PropertyType::String))
            .build()
            .unwrap();

        let names: Vec<&str> = class.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["name", "age", "email"]);
    }

    #[test]
    fn test_builder_rejects_duplicate_property() {
        let result = ClassModel::builder("Person")
            .property("name", PropertyType::String)
            .property("name", PropertyType::Integer)
            .build();

        assert_eq!(
            result,
            Err(ModelError::DuplicateProperty {
                class: "Person".to_string(),
                property: "name".to_string(),
            })
        );
    }

    #[test]
    fn test_builder_rejects_empty_names() {
        assert_eq!(
            ClassModel::builder("  ").build(),
            Err(ModelError::EmptyClassName)
        );
        assert!(matches!(
            ClassModel::builder("A").property("", PropertyType::String).build(),
            Err(ModelError::EmptyPropertyName { .. })
        ));
    }

    #[test]
    fn test_observe_property_widens() {
        let mut builder = ClassModel::builder("Reading");
        builder
            .observe_property("value", PropertyType::Integer)
            .observe_property("unit", PropertyType::String)
            .observe_property("value", PropertyType::Float)
            .observe_property("unit", PropertyType::Null);

        let class = builder.build().unwrap();
        assert_eq!(class.properties().len(), 2);
        assert_eq!(class.property("value").unwrap().ty, PropertyType::Float);
        assert_eq!(
            class.property("unit").unwrap().ty,
            PropertyType::optional(PropertyType::String)
        );
    }

    #[test]
    fn test_empty_class_is_valid() {
        let class = ClassModel::builder("Empty").build().unwrap();
        assert!(class.is_empty());
        assert!(class.nested_classes().is_empty());
    }

    #[test]
    fn test_nested_classes_are_distinct() {
        let class = ClassModel::builder("Order")
            .property("customer", PropertyType::class("Customer"))
            .property("items", PropertyType::array(PropertyType::class("Item")))
            .property("billing", PropertyType::optional(PropertyType::class("Customer")))
            .build()
            .unwrap();

        assert_eq!(class.nested_classes(), vec!["Customer", "Item"]);
    }

    #[test]
    fn test_same_shape_ignores_name() {
        let a = ClassModel::builder("Home")
            .property("street", PropertyType::String)
            .build()
            .unwrap();
        let b = ClassModel::builder("Work")
            .property("street", PropertyType::String)
            .build()
            .unwrap();
        let c = ClassModel::builder("Other")
            .property("street", PropertyType::Integer)
            .build()
            .unwrap();

        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }
}
