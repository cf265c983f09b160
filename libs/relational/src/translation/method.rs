use crate::{ast::ValueType, error::Error};
use itertools::Itertools;
use std::fmt;

/// The signature of a host method.
///
/// Two infos are the same method iff declaring type, name, parameter types and return type
/// all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    pub declaring_type: &'static str,
    pub name: &'static str,
    pub parameters: &'static [ValueType],
    pub return_type: ValueType,
    /// Static methods receive no instance. Extension methods are static and take their
    /// receiver as the first argument.
    pub is_static: bool,
}

impl MethodInfo {
    pub fn matches(&self, declaring_type: &str, name: &str, parameters: &[ValueType]) -> bool {
        self.declaring_type == declaring_type && self.name == name && self.parameters == parameters
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.declaring_type,
            self.name,
            self.parameters.iter().join(", ")
        )
    }
}

/// Resolves method signatures to their `static` descriptions.
#[derive(Debug, Clone)]
pub struct MethodCatalog {
    methods: Vec<&'static MethodInfo>,
}

impl Default for MethodCatalog {
    fn default() -> Self {
        Self {
            methods: super::methods::ALL.to_vec(),
        }
    }
}

impl MethodCatalog {
    /// A catalog of the built-in host methods.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, method: &'static MethodInfo) {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }

    pub fn find_method(
        &self,
        declaring_type: &str,
        name: &str,
        parameters: &[ValueType],
    ) -> Option<&'static MethodInfo> {
        self.methods
            .iter()
            .copied()
            .find(|method| method.matches(declaring_type, name, parameters))
    }

    pub fn get_required_method(
        &self,
        declaring_type: &str,
        name: &str,
        parameters: &[ValueType],
    ) -> crate::Result<&'static MethodInfo> {
        self.find_method(declaring_type, name, parameters)
            .ok_or_else(|| Error::method_not_found(declaring_type, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, translation::methods};

    #[test]
    fn overloads_are_resolved_by_parameter_types() {
        let catalog = MethodCatalog::new();

        let abs_int = catalog.get_required_method("Math", "Abs", &[ValueType::Int64]).unwrap();
        let abs_double = catalog.get_required_method("Math", "Abs", &[ValueType::Double]).unwrap();

        assert!(std::ptr::eq(abs_int, &methods::MATH_ABS_INT64));
        assert!(std::ptr::eq(abs_double, &methods::MATH_ABS_DOUBLE));
        assert_ne!(abs_int, abs_double);
    }

    #[test]
    fn unknown_methods_are_reported() {
        let catalog = MethodCatalog::new();
        let err = catalog
            .get_required_method("String", "Substring", &[ValueType::Int32])
            .unwrap_err();

        assert_eq!(
            &ErrorKind::MethodNotFound {
                declaring_type: "String".into(),
                name: "Substring".into()
            },
            err.kind()
        );
    }

    #[test]
    fn display_shows_the_signature() {
        assert_eq!("String.Substring(Int32, Int32)", methods::STRING_SUBSTRING.to_string());
    }
}
