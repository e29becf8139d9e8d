//! vbsfmt - VBScript syntax tree printer
//!
//! Reads a JSON-encoded syntax tree and writes it back out as VBScript source.

use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

use vbsast::ast::{self, File};
use vbsast::printer::{self, PrintError};

/// vbsfmt - render a VBScript syntax tree as source
#[derive(Parser, Debug)]
#[command(name = "vbsfmt")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-encoded syntax tree, or `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Error reading '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("Malformed syntax tree in '{path}': {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("Malformed syntax tree in '{path}': {reason}")]
    Malformed {
        path: String,
        reason: ast::MalformedNode,
    },

    #[error("Error writing '{path}': {source}")]
    Write { path: String, source: io::Error },

    #[error(transparent)]
    Print(#[from] PrintError),
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let name = args.input.display().to_string();
    let json = read_input(args)?;
    log::debug!("read {} bytes from {}", json.len(), name);

    let file = decode(&name, &json)?;
    log::info!(
        "{}: {} declarations, {} statements",
        name,
        file.decls.len(),
        file.stmts.len()
    );

    match &args.output {
        Some(path) => {
            let text = printer::render(&file);
            fs::write(path, text).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            printer::print_to(&file, &mut out)?;
            out.flush().map_err(PrintError::from)?;
        }
    }

    Ok(())
}

/// Decodes a JSON tree and rejects trees the printer cannot render.
fn decode(name: &str, json: &str) -> Result<File, CliError> {
    let file: File = serde_json::from_str(json).map_err(|source| CliError::Decode {
        path: name.to_string(),
        source,
    })?;
    ast::validate(&file).map_err(|reason| CliError::Malformed {
        path: name.to_string(),
        reason,
    })?;
    Ok(file)
}

fn read_input(args: &Args) -> Result<String, CliError> {
    let mut json = String::new();
    let result = if args.input.as_os_str() == "-" {
        io::stdin().read_to_string(&mut json).map(|_| ())
    } else {
        fs::read_to_string(&args.input).map(|s| json = s)
    };

    result.map_err(|source| CliError::Read {
        path: args.input.display().to_string(),
        source,
    })?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vbsast::ast::Node;
    use vbsast::printer::render;
    use vbsast::token::Pos;

    const RGB_CLASS: &str = r#"{
        "decls": [
            {"Dim": {
                "list": [{"Ident": {"name": "x"}}],
                "set": {
                    "tok": "Set",
                    "lhs": {"Ident": {"name": "x"}},
                    "rhs": {"Call": {
                        "func": {"Ident": {"name": "CreateObject"}},
                        "args": [{"BasicLit": {"kind": "String", "value": "Scripting.Dictionary"}}]
                    }}
                }
            }},
            {"ReDim": {
                "preserve_pos": 12,
                "list": [{"IndexList": {
                    "x": {"Ident": {"name": "X"}},
                    "indices": [
                        {"BasicLit": {"kind": "Integer", "value": "10"}},
                        {"BasicLit": {"kind": "Integer", "value": "15"}}
                    ]
                }}]
            }},
            {"Class": {
                "modifier": 1,
                "mod_pos": 40,
                "class_pos": 47,
                "name": {"name": "RGB"},
                "decls": [
                    {"Func": {
                        "modifier": 2,
                        "name": {"name": "color"},
                        "params": [{"tok": "ByVal", "name": {"name": "v"}}],
                        "body": {"list": [
                            {"If": {
                                "cond": {"Binary": {
                                    "x": {"Ident": {"name": "v"}},
                                    "op": "LessEqual",
                                    "y": {"BasicLit": {"kind": "Integer", "value": "0"}}
                                }},
                                "body": {"list": [
                                    {"Expr": {"x": {"Call": {
                                        "func": {"Selector": {
                                            "x": {"Ident": {"name": "Err"}},
                                            "sel": {"name": "Raise"}
                                        }},
                                        "args": [{"BasicLit": {"kind": "Integer", "value": "1001"}}]
                                    }}}}
                                ]}
                            }}
                        ]}
                    }}
                ],
                "stmts": [
                    {"Member": {"modifier": 2, "name": {"name": "m_value"}}}
                ]
            }}
        ],
        "stmts": [
            {"OnError": {"resume": {}}}
        ]
    }"#;

    #[test]
    fn test_decode_and_render() {
        let file = decode("rgb.json", RGB_CLASS).unwrap();

        let expected = r#"Dim x: Set x = CreateObject("Scripting.Dictionary")
ReDim Preserve X(10, 15)
Public Class RGB
  Private Function color(ByVal v)
    If v <= 0 Then
      Err.Raise(1001)
    End If
  End Function
  Private m_value
End Class
On Error Resume Next
"#;
        assert_eq!(render(&file), expected);
    }

    #[test]
    fn test_decode_positions_and_defaults() {
        let file = decode("rgb.json", RGB_CLASS).unwrap();

        // Positions are stored 1-based; omitted ones decode as NONE.
        // A public class starts at its modifier.
        assert_eq!(file.decls[2].pos(), Pos::new(39));
        assert_eq!(file.decls[0].pos(), Pos::NONE);
        assert!(file.doc.is_none());
    }

    #[test]
    fn test_truncated_json_is_decode_error() {
        let truncated = &RGB_CLASS[..RGB_CLASS.len() / 2];
        let err = decode("cut.json", truncated).unwrap_err();
        assert!(matches!(err, CliError::Decode { ref path, .. } if path == "cut.json"));
        assert!(err.to_string().contains("cut.json"));
    }

    #[test]
    fn test_unknown_node_kind_is_decode_error() {
        let json = r#"{"stmts": [{"GoSub": {}}]}"#;
        assert!(matches!(decode("x.json", json), Err(CliError::Decode { .. })));
    }

    #[test]
    fn test_malformed_tree_is_rejected_before_render() {
        let empty_dim = r#"{"decls": [{"Dim": {"list": []}}]}"#;
        let err = decode("dim.json", empty_dim).unwrap_err();
        match &err {
            CliError::Malformed { path, reason } => {
                assert_eq!(path, "dim.json");
                assert_eq!(reason.node, "DimDecl");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
        assert!(err.to_string().contains("variable list is empty"));

        let empty_doc = r#"{"stmts": [{"Expr": {"doc": {"list": []}, "x": {"Ident": {"name": "a"}}}}]}"#;
        assert!(matches!(
            decode("doc.json", empty_doc),
            Err(CliError::Malformed { .. })
        ));

        let bare_case = r#"{"stmts": [{"Select": {
            "var": {"Ident": {"name": "x"}},
            "cases": [{"body": {"list": []}}]
        }}]}"#;
        assert!(matches!(
            decode("case.json", bare_case),
            Err(CliError::Malformed { .. })
        ));
    }
}
