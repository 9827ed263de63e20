//! Contract invocation script assembler CLI.
//!
//! Builds AVM scripts from textual parameters and prints them as hex.
//!
//! # Usage
//! ```text
//! neo-script invoke <script_hash> <operation> [type:value ...] [--tail-call] [--no-args] [--disasm]
//! neo-script syscall <api> [--compress] [--disasm]
//! neo-script disasm <hex>
//! ```
//!
//! # Parameters
//! `int:-5`, `bool:true`, `str:hello`, `bytes:<hex>`, `hash160:<hex>`,
//! `hash256:<hex>`, `pubkey:<hex>`, `sig:<hex>`. Full type names such as
//! `Integer` or `ByteArray` are accepted too.
//!
//! # Environment
//! - `NEO_SCRIPT_LOG`: minimum log level (`debug`, `info`, `warn`, `error`)
//! - `NEO_SCRIPT_LOG_TIMESTAMP`: `0` hides log timestamps

use clap::{Parser, Subcommand};
use neo_script::script::builder::ScriptBuilder;
use neo_script::script::errors::ScriptError;
use neo_script::script::reader::disassemble;
use neo_script::types::contract_parameter::{
    ContractParameter, ContractParameterType, UnknownParameterType,
};
use neo_script::utils::log::{self, Level};
use neo_script::{error, info};
use std::process;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "neo-script", version, about = "Assemble NEO contract invocation scripts")]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assemble a contract invocation.
    Invoke {
        /// 20-byte contract script hash as hex.
        script_hash: String,
        /// Operation name passed to the contract.
        operation: String,
        /// Arguments as `type:value`.
        #[arg(allow_hyphen_values = true)]
        params: Vec<String>,
        /// Emit TAILCALL instead of APPCALL.
        #[arg(long)]
        tail_call: bool,
        /// Omit the argument list entirely; produces an empty script.
        #[arg(long, conflicts_with = "params")]
        no_args: bool,
        /// Print the disassembly after the hex.
        #[arg(long)]
        disasm: bool,
    },
    /// Assemble a single interop service call.
    Syscall {
        /// Interop service name, e.g. `Neo.Storage.GetContext`.
        api: String,
        /// Use the 4-byte hashed form of the name.
        #[arg(long)]
        compress: bool,
        #[arg(long)]
        disasm: bool,
    },
    /// Disassemble a hex script.
    Disasm {
        /// Script bytes as hex.
        script: String,
    },
}

#[derive(Debug, Error, PartialEq)]
enum CliError {
    #[error("parameter '{0}' must be written as type:value")]
    MalformedParameter(String),
    #[error(transparent)]
    UnknownType(#[from] UnknownParameterType),
    #[error("parameter type {0} cannot be given on the command line")]
    UnsupportedType(ContractParameterType),
    #[error("invalid {kind} value '{value}'")]
    InvalidValue { kind: ContractParameterType, value: String },
    #[error("invalid hex '{0}'")]
    InvalidHex(String),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

fn parse_hex(value: &str) -> Result<Vec<u8>, CliError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|_| CliError::InvalidHex(value.to_string()))
}

fn parse_type(name: &str) -> Result<ContractParameterType, CliError> {
    let kind = match name.to_ascii_lowercase().as_str() {
        "int" => ContractParameterType::Integer,
        "bool" => ContractParameterType::Boolean,
        "str" => ContractParameterType::String,
        "bytes" => ContractParameterType::ByteArray,
        "pubkey" => ContractParameterType::PublicKey,
        "sig" => ContractParameterType::Signature,
        _ => name.parse()?,
    };
    Ok(kind)
}

/// Parses one `type:value` argument.
fn parse_param(arg: &str) -> Result<ContractParameter, CliError> {
    let (name, value) = arg
        .split_once(':')
        .ok_or_else(|| CliError::MalformedParameter(arg.to_string()))?;
    let kind = parse_type(name)?;
    let invalid = || CliError::InvalidValue {
        kind,
        value: value.to_string(),
    };

    let param = match kind {
        ContractParameterType::Integer => {
            ContractParameter::Integer(value.parse().map_err(|_| invalid())?)
        }
        ContractParameterType::Boolean => {
            ContractParameter::Boolean(value.parse().map_err(|_| invalid())?)
        }
        ContractParameterType::String => ContractParameter::String(value.to_string()),
        ContractParameterType::ByteArray => ContractParameter::ByteArray(parse_hex(value)?),
        ContractParameterType::Hash160 => ContractParameter::Hash160(parse_hex(value)?),
        ContractParameterType::Hash256 => ContractParameter::Hash256(parse_hex(value)?),
        ContractParameterType::PublicKey => ContractParameter::PublicKey(parse_hex(value)?),
        ContractParameterType::Signature => ContractParameter::Signature(parse_hex(value)?),
        ContractParameterType::Array
        | ContractParameterType::InteropInterface
        | ContractParameterType::Void => return Err(CliError::UnsupportedType(kind)),
    };
    Ok(param)
}

/// Runs `command` and returns the text to print.
fn run(command: Command) -> Result<String, CliError> {
    let (script, disasm) = match command {
        Command::Invoke {
            script_hash,
            operation,
            params,
            tail_call,
            no_args,
            disasm,
        } => {
            let hash = parse_hex(&script_hash)?;
            let args = params
                .iter()
                .map(|p| parse_param(p))
                .collect::<Result<Vec<_>, _>>()?;

            let mut sb = ScriptBuilder::new();
            let args = if no_args { None } else { Some(args.as_slice()) };
            sb.make_invocation_script_with(&hash, &operation, args, tail_call)?;
            info!(
                "assembled '{}' with {} argument(s) into {} bytes",
                operation,
                params.len(),
                sb.len()
            );
            (sb.into_bytes(), disasm)
        }
        Command::Syscall {
            api,
            compress,
            disasm,
        } => {
            let mut sb = ScriptBuilder::new();
            sb.emit_sys_call(&api, compress)?;
            (sb.into_bytes(), disasm)
        }
        Command::Disasm { script } => {
            let bytes = parse_hex(&script)?;
            return Ok(disassemble(&bytes)?);
        }
    };

    let mut out = hex::encode(&script);
    if disasm {
        out.push('\n');
        out.push_str(&disassemble(&script)?);
    }
    Ok(out)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = log::init_from_env() {
        error!("{e}");
        process::exit(2);
    }
    if cli.verbose {
        log::set_level(Level::Debug);
    }

    match run(cli.command) {
        Ok(out) => println!("{}", out.trim_end()),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_short_names() {
        assert_eq!(parse_param("int:-5"), Ok(ContractParameter::Integer(-5)));
        assert_eq!(parse_param("bool:true"), Ok(ContractParameter::Boolean(true)));
        assert_eq!(
            parse_param("str:a:b"),
            Ok(ContractParameter::String("a:b".to_string()))
        );
        assert_eq!(
            parse_param("bytes:0x0aff"),
            Ok(ContractParameter::ByteArray(vec![0x0a, 0xff]))
        );
        assert_eq!(parse_param("bytes:"), Ok(ContractParameter::ByteArray(vec![])));
    }

    #[test]
    fn parse_param_full_type_names() {
        assert_eq!(
            parse_param("Integer:7"),
            Ok(ContractParameter::Integer(7))
        );
        assert_eq!(
            parse_param("hash160:00"),
            Ok(ContractParameter::Hash160(vec![0]))
        );
    }

    #[test]
    fn parse_param_errors() {
        assert_eq!(
            parse_param("42"),
            Err(CliError::MalformedParameter("42".to_string()))
        );
        assert_eq!(
            parse_param("int:x"),
            Err(CliError::InvalidValue {
                kind: ContractParameterType::Integer,
                value: "x".to_string()
            })
        );
        assert_eq!(
            parse_param("array:1"),
            Err(CliError::UnsupportedType(ContractParameterType::Array))
        );
        assert!(matches!(parse_param("float:1"), Err(CliError::UnknownType(_))));
        assert_eq!(
            parse_param("bytes:zz"),
            Err(CliError::InvalidHex("zz".to_string()))
        );
    }

    #[test]
    fn run_invoke_prints_hex() {
        let out = run(Command::Invoke {
            script_hash: "00".repeat(20),
            operation: "name".to_string(),
            params: vec![],
            tail_call: false,
            no_args: false,
            disasm: false,
        })
        .unwrap();
        assert_eq!(out, format!("00c1046e616d6567{}", "00".repeat(20)));
    }

    #[test]
    fn run_invoke_without_args_is_empty() {
        let out = run(Command::Invoke {
            script_hash: "00".repeat(20),
            operation: "name".to_string(),
            params: vec![],
            tail_call: false,
            no_args: true,
            disasm: false,
        })
        .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn run_invoke_rejects_short_hash() {
        let err = run(Command::Invoke {
            script_hash: "00".repeat(19),
            operation: "name".to_string(),
            params: vec!["int:1".to_string()],
            tail_call: false,
            no_args: false,
            disasm: false,
        })
        .unwrap_err();
        assert_eq!(
            err,
            CliError::Script(ScriptError::InvalidIdentifierLength {
                expected: 20,
                actual: 19
            })
        );
    }

    #[test]
    fn run_syscall_with_disassembly() {
        let out = run(Command::Syscall {
            api: "Neo.Runtime.Log".to_string(),
            compress: false,
            disasm: true,
        })
        .unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("680f4e656f2e52756e74696d652e4c6f67"));
        assert_eq!(
            lines.next(),
            Some("0000: SYSCALL 0f4e656f2e52756e74696d652e4c6f67")
        );
    }

    #[test]
    fn run_disasm() {
        assert_eq!(
            run(Command::Disasm {
                script: "51c1".to_string()
            }),
            Ok("0000: PUSH1\n0001: PACK\n".to_string())
        );
    }
}
