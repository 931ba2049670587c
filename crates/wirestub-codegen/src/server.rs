use crate::contract::{Contract, ContractError};

/// Emits the server stub module for a contract.
///
/// Unlike the client emitter, this one does not specialize per procedure:
/// dispatch is fully dynamic, resolved by name in the registry the deployer
/// fills in at startup. The generator cannot know which concrete callables
/// the deployer will supply beyond their names, so the emitted text is a
/// fixed dispatcher binary preceded by a comment listing the names the
/// contract expects.
///
/// Deterministic: the same contract always yields byte-identical text.
pub fn emit_server(contract: &Contract) -> Result<String, ContractError> {
    contract.validate()?;

    let mut out = String::from("// Generated by wirestub. Do not edit.\n//\n");
    if contract.procedures.is_empty() {
        out.push_str("// The contract declares no procedures; the registry starts empty.\n");
    } else {
        out.push_str("// The deployer's `procedures` module is expected to register:\n");
        for procedure in &contract.procedures {
            out.push_str(&format!(
                "//   {} (arity {})\n",
                procedure.name,
                procedure.parameters.len()
            ));
        }
    }
    out.push_str(SERVER_BODY);
    Ok(out)
}

const SERVER_BODY: &str = r#"
pub use wirestub_server::{handle_request, start_server, Registry, ServerConfig};

mod procedures;

fn main() -> std::process::ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut registry = Registry::new();
    procedures::register(&mut registry);

    if let Err(err) = start_server(&ServerConfig::default(), &registry) {
        tracing::error!("{}", err);
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Procedure;

    fn contract() -> Contract {
        Contract::from_json(
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
                    {"procedure_name": "ping", "parameters": []}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn emits_the_dispatcher_main() {
        let source = emit_server(&contract()).unwrap();
        assert!(source.contains("fn main() -> std::process::ExitCode"));
        assert!(source.contains("procedures::register(&mut registry);"));
        assert!(source.contains("start_server(&ServerConfig::default(), &registry)"));
        assert!(source.contains(
            "pub use wirestub_server::{handle_request, start_server, Registry, ServerConfig};"
        ));
    }

    #[test]
    fn no_per_procedure_dispatch_is_emitted() {
        // Procedure names appear only in the expected-registrations comment,
        // never in code.
        let source = emit_server(&contract()).unwrap();
        assert!(source.contains("//   add (arity 2)"));
        assert!(source.contains("//   ping (arity 0)"));
        let code: String = source
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .collect();
        assert!(!code.contains("add"));
        assert!(!code.contains("ping"));
    }

    #[test]
    fn emission_is_deterministic() {
        let contract = contract();
        assert_eq!(emit_server(&contract).unwrap(), emit_server(&contract).unwrap());
    }

    #[test]
    fn empty_contract_still_emits_a_server() {
        let source = emit_server(&Contract::default()).unwrap();
        assert!(source.contains("declares no procedures"));
        assert!(source.contains("fn main()"));
    }

    #[test]
    fn invalid_contract_fails_emission() {
        let contract = Contract {
            procedures: vec![Procedure {
                name: "not an identifier".to_string(),
                parameters: vec![],
                return_type: String::new(),
            }],
        };
        assert!(matches!(
            emit_server(&contract).unwrap_err(),
            ContractError::Validation(_)
        ));
    }
}
