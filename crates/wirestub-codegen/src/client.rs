use crate::contract::{Contract, ContractError, Procedure};

/// Emits the client stub module for a contract.
///
/// The module re-exports the `wirestub-client` runtime and defines one
/// `pub fn` per well-formed procedure, in declaration order. Deterministic:
/// the same contract always yields byte-identical text.
///
/// # Errors
///
/// [`ContractError::Validation`] when the contract's names could not be
/// emitted as compilable Rust (see [`Contract::validate`]).
pub fn emit_client(contract: &Contract) -> Result<String, ContractError> {
    contract.validate()?;

    let mut out = String::from(CLIENT_HEADER);
    if !contract.procedures.is_empty() {
        out.push_str("\nuse serde_json::{Map, Value};\n");
    }
    for procedure in &contract.procedures {
        push_stub(&mut out, procedure);
    }
    Ok(out)
}

const CLIENT_HEADER: &str = "\
// Generated by wirestub. Do not edit.
//
// One stub function per contract procedure. Each call opens a fresh
// connection to the target and performs one synchronous round trip.

pub use wirestub_client::{make_request, validate_params, CallError, CallTarget, ParamSpec};
";

fn push_stub(out: &mut String, procedure: &Procedure) {
    let name = &procedure.name;

    out.push('\n');
    let return_type = &procedure.return_type;
    if return_type.is_empty() || return_type.chars().any(char::is_control) {
        out.push_str(&format!("/// Calls the remote `{}` procedure.\n", name));
    } else {
        out.push_str(&format!(
            "/// Calls the remote `{}` procedure. Declared return type: `{}`.\n",
            name, return_type
        ));
    }

    let mut args: Vec<String> = procedure
        .parameters
        .iter()
        .map(|parameter| format!("{}: Value", parameter.name))
        .collect();
    args.push("target: &CallTarget".to_string());
    out.push_str(&format!(
        "pub fn {}({}) -> Result<Value, CallError> {{\n",
        name,
        args.join(", ")
    ));

    if procedure.parameters.is_empty() {
        out.push_str("    let expected_params: &[ParamSpec] = &[];\n");
        out.push_str("    let params = Map::new();\n");
    } else {
        out.push_str("    let expected_params: &[ParamSpec] = &[\n");
        for parameter in &procedure.parameters {
            out.push_str(&format!(
                "        ParamSpec {{ name: {:?}, data_type: {:?} }},\n",
                parameter.name, parameter.data_type
            ));
        }
        out.push_str("    ];\n");
        out.push_str("    let mut params = Map::new();\n");
        for parameter in &procedure.parameters {
            out.push_str(&format!(
                "    params.insert({:?}.to_string(), {});\n",
                parameter.name, parameter.name
            ));
        }
    }

    out.push_str(&format!(
        "    make_request({:?}, params, expected_params, target)\n",
        name
    ));
    out.push_str("}\n");
}
