use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Contract handling failures.
///
/// `Read` and `Json` are fatal to the generation run before any emission is
/// attempted. `Validation` is raised by the emitters when the surviving
/// declarations could not produce compilable stubs.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Error reading contract file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Error reading contract file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid contract: {0}")]
    Validation(String),
}

/// The external contract document, as found on disk.
///
/// Every field is optional; unknown keys are ignored. Loading is
/// deliberately permissive - a partial contract produces partial stubs
/// rather than aborting.
#[derive(Debug, Deserialize)]
struct RawContract {
    #[serde(default)]
    remote_procedures: Vec<RawProcedure>,
}

#[derive(Debug, Deserialize)]
struct RawProcedure {
    procedure_name: Option<String>,
    #[serde(default)]
    parameters: Vec<RawParameter>,
    return_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    parameter_name: Option<String>,
    data_type: Option<String>,
}

/// A well-formed procedure declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub name: String,
    pub parameters: Vec<Parameter>,
    /// Advisory only; carried into generated doc comments, never enforced.
    pub return_type: String,
}

/// A well-formed parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Advisory type string, shipped in the client's `expected_params`
    /// metadata. Only the parameter count is ever checked.
    pub data_type: String,
}

/// In-memory service contract: the declarations that survived permissive
/// loading, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contract {
    pub procedures: Vec<Procedure>,
}

impl Contract {
    /// Loads a contract from a JSON file.
    ///
    /// # Errors
    ///
    /// [`ContractError::Read`] when the file is absent or unreadable,
    /// [`ContractError::Json`] when its contents are not valid JSON. Both
    /// are fatal; no emission is attempted. Structural problems below the
    /// document level degrade per-field instead: a procedure without a
    /// `procedure_name`, or a parameter without a `parameter_name`, is
    /// silently skipped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses a contract from JSON text. Same degradation rules as
    /// [`Contract::from_path`].
    pub fn from_json(text: &str) -> Result<Self, ContractError> {
        let raw: RawContract = serde_json::from_str(text)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawContract) -> Self {
        let procedures = raw
            .remote_procedures
            .into_iter()
            .filter_map(|procedure| {
                let name = procedure.procedure_name.filter(|name| !name.is_empty())?;
                let parameters = procedure
                    .parameters
                    .into_iter()
                    .filter_map(|parameter| {
                        // Skipping an unnamed parameter silently
                        // desynchronizes positional intent from the declared
                        // type list; the external format allows it anyway.
                        let name = parameter.parameter_name.filter(|name| !name.is_empty())?;
                        Some(Parameter {
                            name,
                            data_type: parameter.data_type.unwrap_or_else(|| "any".to_string()),
                        })
                    })
                    .collect();
                Some(Procedure {
                    name,
                    parameters,
                    return_type: procedure.return_type.unwrap_or_default(),
                })
            })
            .collect();
        Contract { procedures }
    }

    /// Checks that the surviving declarations can be emitted as compilable
    /// Rust.
    ///
    /// The loader tolerates almost anything; this is the stricter gate the
    /// emitters run first. Duplicate procedure names would collide as
    /// `pub fn` items, duplicate parameter names within a procedure would
    /// collide as bindings, and non-identifier names cannot appear in
    /// source at all. `target` is refused as a parameter name because every
    /// generated stub already takes a trailing `target` argument.
    pub fn validate(&self) -> Result<(), ContractError> {
        let mut seen_procedures = HashSet::new();
        for procedure in &self.procedures {
            if !is_identifier(&procedure.name) {
                return Err(ContractError::Validation(format!(
                    "procedure name '{}' is not a valid identifier",
                    procedure.name
                )));
            }
            if !seen_procedures.insert(procedure.name.as_str()) {
                return Err(ContractError::Validation(format!(
                    "duplicate procedure name '{}'",
                    procedure.name
                )));
            }

            let mut seen_parameters = HashSet::new();
            for parameter in &procedure.parameters {
                if !is_identifier(&parameter.name) {
                    return Err(ContractError::Validation(format!(
                        "parameter name '{}' of procedure '{}' is not a valid identifier",
                        parameter.name, procedure.name
                    )));
                }
                if parameter.name == "target" {
                    return Err(ContractError::Validation(format!(
                        "parameter name 'target' of procedure '{}' collides with the \
                         generated endpoint argument",
                        procedure.name
                    )));
                }
                if !seen_parameters.insert(parameter.name.as_str()) {
                    return Err(ContractError::Validation(format!(
                        "duplicate parameter name '{}' in procedure '{}'",
                        parameter.name, procedure.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Rust keywords that cannot be used as emitted function or binding names.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

fn is_identifier(name: &str) -> bool {
    if KEYWORDS.contains(&name) {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn procedure(name: &str, parameters: &[(&str, &str)]) -> Procedure {
        Procedure {
            name: name.to_string(),
            parameters: parameters
                .iter()
                .map(|(name, data_type)| Parameter {
                    name: name.to_string(),
                    data_type: data_type.to_string(),
                })
                .collect(),
            return_type: String::new(),
        }
    }

    #[test]
    fn loads_a_full_contract() {
        let contract = Contract::from_json(
            r#"{
                "remote_procedures": [
                    {
                        "procedure_name": "add",
                        "parameters": [
                            {"parameter_name": "a", "data_type": "int"},
                            {"parameter_name": "b", "data_type": "int"}
                        ],
                        "return_type": "int"
                    },
                    {
                        "procedure_name": "ping",
                        "parameters": [],
                        "return_type": "string"
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(contract.procedures.len(), 2);
        assert_eq!(contract.procedures[0].name, "add");
        assert_eq!(contract.procedures[0].parameters.len(), 2);
        assert_eq!(contract.procedures[0].parameters[1].data_type, "int");
        assert_eq!(contract.procedures[1].return_type, "string");
    }

    #[test]
    fn unnamed_procedures_are_skipped() {
        let contract = Contract::from_json(
            r#"{
                "remote_procedures": [
                    {"parameters": [], "return_type": "int"},
                    {"procedure_name": "", "parameters": []},
                    {"procedure_name": "kept", "parameters": []}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(contract.procedures.len(), 1);
        assert_eq!(contract.procedures[0].name, "kept");
    }

    #[test]
    fn unnamed_parameters_are_skipped() {
        let contract = Contract::from_json(
            r#"{
                "remote_procedures": [{
                    "procedure_name": "mixed",
                    "parameters": [
                        {"data_type": "int"},
                        {"parameter_name": "", "data_type": "int"},
                        {"parameter_name": "kept"}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let parameters = &contract.procedures[0].parameters;
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].name, "kept");
        // Missing data_type defaults to "any".
        assert_eq!(parameters[0].data_type, "any");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let contract = Contract::from_json(
            r#"{
                "version": 3,
                "remote_procedures": [{
                    "procedure_name": "ping",
                    "parameters": [],
                    "deprecated": true
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(contract.procedures.len(), 1);
    }

    #[test]
    fn empty_document_is_an_empty_contract() {
        let contract = Contract::from_json("{}").unwrap();
        assert!(contract.procedures.is_empty());
    }

    #[test]
    fn invalid_json_is_fatal() {
        assert!(matches!(
            Contract::from_json("{not json").unwrap_err(),
            ContractError::Json(_)
        ));
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(matches!(
            Contract::from_path("/nonexistent/contract.json").unwrap_err(),
            ContractError::Read(_)
        ));
    }

    #[test]
    fn validate_accepts_well_formed_contracts() {
        let contract = Contract {
            procedures: vec![
                procedure("add", &[("a", "int"), ("b", "int")]),
                procedure("ping", &[]),
            ],
        };
        assert!(contract.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_procedures() {
        let contract = Contract {
            procedures: vec![procedure("add", &[]), procedure("add", &[])],
        };
        let err = contract.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate procedure name 'add'"));
    }

    #[test]
    fn validate_rejects_duplicate_parameters() {
        let contract = Contract {
            procedures: vec![procedure("add", &[("a", "int"), ("a", "int")])],
        };
        let err = contract.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate parameter name 'a'"));
    }

    #[test]
    fn validate_rejects_non_identifiers() {
        for name in ["my proc", "1st", "a-b", "", "fn"] {
            let contract = Contract {
                procedures: vec![procedure(name, &[])],
            };
            assert!(
                contract.validate().is_err(),
                "'{}' should have been rejected",
                name
            );
        }
    }

    #[test]
    fn validate_rejects_reserved_target_parameter() {
        let contract = Contract {
            procedures: vec![procedure("call_home", &[("target", "string")])],
        };
        let err = contract.validate().unwrap_err();
        assert!(err.to_string().contains("'target'"));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("snake_case"));
        assert!(is_identifier("_leading"));
        assert!(is_identifier("alpha2"));
        assert!(!is_identifier("2alpha"));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier("type"));
        assert!(!is_identifier(""));
    }
}
