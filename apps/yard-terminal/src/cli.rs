//! # Command Line
//!
//! Argument parsing for the `yard-terminal` binary.
//!
//! ## Usage
//! ```bash
//! yard-terminal summary month --from 2024-01-01
//! yard-terminal list --all --from 2024-03-01 --to 2024-03-31
//! yard-terminal show 42
//! yard-terminal void 42
//! yard-terminal edit 42 101:110:10
//! yard-terminal ticket --client 000001 3:100:10 5:20.5:0.5:1.250
//! yard-terminal clients
//! yard-terminal catalog
//! yard-terminal settings off
//! ```

use crate::commands::management::LineEditRequest;
use crate::commands::ticketing::AddLineRequest;

pub const USAGE: &str = "\
Yard Ticket terminal

Usage: yard-terminal <COMMAND> [OPTIONS]

Commands:
  summary [day|month|year] [--from DATE] [--to DATE]   Totals per period
  list [--all] [--from DATE] [--to DATE]                Receipts, newest first
  show <ID>                                             Receipt with its lines
  void <ID>                                             Void a receipt
  edit <ID> <LINE:GROSS:TARE>...                        Re-weigh stored lines
  ticket [--client CODE] [--operator EMAIL] <MATERIAL:GROSS:TARE[:PRICE]>...
                                                        Issue a receipt
  clients                                               Active clients
  catalog                                               Price board
  settings [on|off]                                     Price adjustment switch
  help                                                  Show this message

Dates are YYYY-MM-DD. Output is JSON on stdout.";

/// A parsed command line.
#[derive(Debug, Clone)]
pub enum Command {
    Summary {
        granularity: String,
        from: Option<String>,
        to: Option<String>,
    },
    List {
        include_voided: bool,
        from: Option<String>,
        to: Option<String>,
    },
    Show {
        receipt_id: i64,
    },
    Void {
        receipt_id: i64,
    },
    Edit {
        receipt_id: i64,
        edits: Vec<LineEditRequest>,
    },
    Ticket {
        client_code: Option<String>,
        operator_email: Option<String>,
        lines: Vec<AddLineRequest>,
    },
    Clients,
    Catalog,
    Settings {
        permitted: Option<bool>,
    },
    Help,
}

/// Parses arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match name.as_str() {
        "summary" => {
            let mut granularity = String::from("day");
            let (from, to, positional) = take_range(rest)?;
            if let Some(g) = positional.first() {
                granularity = g.clone();
            }
            Ok(Command::Summary {
                granularity,
                from,
                to,
            })
        }
        "list" => {
            let include_voided = rest.iter().any(|a| a == "--all" || a == "-a");
            let rest: Vec<String> = rest
                .iter()
                .filter(|a| *a != "--all" && *a != "-a")
                .cloned()
                .collect();
            let (from, to, _) = take_range(&rest)?;
            Ok(Command::List {
                include_voided,
                from,
                to,
            })
        }
        "show" => Ok(Command::Show {
            receipt_id: receipt_id(rest)?,
        }),
        "void" => Ok(Command::Void {
            receipt_id: receipt_id(rest)?,
        }),
        "edit" => {
            let receipt_id = receipt_id(rest)?;
            let edits = rest[1..]
                .iter()
                .map(|arg| parse_line_edit(arg))
                .collect::<Result<Vec<_>, _>>()?;
            if edits.is_empty() {
                return Err("edit needs at least one LINE:GROSS:TARE".to_string());
            }
            Ok(Command::Edit { receipt_id, edits })
        }
        "ticket" => {
            let mut client_code = None;
            let mut operator_email = None;
            let mut lines = Vec::new();

            let mut i = 0;
            while i < rest.len() {
                match rest[i].as_str() {
                    "--client" | "-c" => {
                        client_code = Some(value_after(rest, i, "--client")?);
                        i += 1;
                    }
                    "--operator" | "-o" => {
                        operator_email = Some(value_after(rest, i, "--operator")?);
                        i += 1;
                    }
                    arg => lines.push(parse_ticket_line(arg)?),
                }
                i += 1;
            }

            Ok(Command::Ticket {
                client_code,
                operator_email,
                lines,
            })
        }
        "clients" => Ok(Command::Clients),
        "catalog" => Ok(Command::Catalog),
        "settings" => {
            let permitted = match rest.first().map(String::as_str) {
                None => None,
                Some("on" | "yes") => Some(true),
                Some("off" | "no") => Some(false),
                Some(other) => return Err(format!("settings expects on or off, got '{}'", other)),
            };
            Ok(Command::Settings { permitted })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(format!("unknown command '{}'", other)),
    }
}

/// Splits `--from`/`--to` options from positional arguments.
fn take_range(args: &[String]) -> Result<(Option<String>, Option<String>, Vec<String>), String> {
    let mut from = None;
    let mut to = None;
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--from" | "-f" => {
                from = Some(value_after(args, i, "--from")?);
                i += 1;
            }
            "--to" | "-t" => {
                to = Some(value_after(args, i, "--to")?);
                i += 1;
            }
            _ => positional.push(args[i].clone()),
        }
        i += 1;
    }

    Ok((from, to, positional))
}

fn value_after(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn receipt_id(args: &[String]) -> Result<i64, String> {
    let raw = args.first().ok_or("missing receipt id")?;
    raw.parse()
        .map_err(|_| format!("receipt id must be a number, got '{}'", raw))
}

/// `LINE_ID:GROSS:TARE`
fn parse_line_edit(arg: &str) -> Result<LineEditRequest, String> {
    let parts: Vec<&str> = arg.split(':').collect();
    let [line_id, gross, tare] = parts.as_slice() else {
        return Err(format!("expected LINE:GROSS:TARE, got '{}'", arg));
    };

    Ok(LineEditRequest {
        line_id: line_id
            .parse()
            .map_err(|_| format!("line id must be a number, got '{}'", line_id))?,
        gross: gross.to_string(),
        tare: tare.to_string(),
    })
}

/// `MATERIAL_ID:GROSS:TARE[:PRICE]`
fn parse_ticket_line(arg: &str) -> Result<AddLineRequest, String> {
    let parts: Vec<&str> = arg.split(':').collect();
    let (material_id, gross, tare, unit_price) = match parts.as_slice() {
        [m, g, t] => (*m, *g, *t, None),
        [m, g, t, p] => (*m, *g, *t, Some(p.to_string())),
        _ => return Err(format!("expected MATERIAL:GROSS:TARE[:PRICE], got '{}'", arg)),
    };

    Ok(AddLineRequest {
        material_id: material_id
            .parse()
            .map_err(|_| format!("material id must be a number, got '{}'", material_id))?,
        unit_price,
        gross: gross.to_string(),
        tare: tare.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_empty_is_help() {
        assert!(matches!(parse_args(&[]), Ok(Command::Help)));
    }

    #[test]
    fn test_summary() {
        match parse_args(&args("summary month --from 2024-01-01")).unwrap() {
            Command::Summary {
                granularity,
                from,
                to,
            } => {
                assert_eq!(granularity, "month");
                assert_eq!(from.as_deref(), Some("2024-01-01"));
                assert!(to.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }

        match parse_args(&args("summary")).unwrap() {
            Command::Summary { granularity, .. } => assert_eq!(granularity, "day"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_list_flags() {
        match parse_args(&args("list --to 2024-03-31 --all")).unwrap() {
            Command::List {
                include_voided,
                from,
                to,
            } => {
                assert!(include_voided);
                assert!(from.is_none());
                assert_eq!(to.as_deref(), Some("2024-03-31"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_args(&args("list --from")).is_err());
    }

    #[test]
    fn test_ticket_lines() {
        match parse_args(&args("ticket -c 000042 3:100:10 5:20.5:0.5:1.250")).unwrap() {
            Command::Ticket {
                client_code,
                operator_email,
                lines,
            } => {
                assert_eq!(client_code.as_deref(), Some("000042"));
                assert!(operator_email.is_none());
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].material_id, 3);
                assert_eq!(lines[0].gross, "100");
                assert!(lines[0].unit_price.is_none());
                assert_eq!(lines[1].unit_price.as_deref(), Some("1.250"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_args(&args("ticket 3:100")).is_err());
        assert!(parse_args(&args("ticket x:1:0")).is_err());
    }

    #[test]
    fn test_edit_and_ids() {
        match parse_args(&args("edit 42 101:110:10")).unwrap() {
            Command::Edit { receipt_id, edits } => {
                assert_eq!(receipt_id, 42);
                assert_eq!(edits[0].line_id, 101);
                assert_eq!(edits[0].gross, "110");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_args(&args("edit 42")).is_err());
        assert!(parse_args(&args("show abc")).is_err());
        assert!(parse_args(&args("void")).is_err());
    }

    #[test]
    fn test_settings_and_unknown() {
        assert!(matches!(
            parse_args(&args("settings off")),
            Ok(Command::Settings {
                permitted: Some(false)
            })
        ));
        assert!(matches!(
            parse_args(&args("settings")),
            Ok(Command::Settings { permitted: None })
        ));
        assert!(parse_args(&args("settings maybe")).is_err());
        assert!(parse_args(&args("print 4")).is_err());
    }
}
