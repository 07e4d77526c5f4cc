//! IO for .bench (ISCAS) files

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};

use itertools::Itertools;

use crate::{Network, Signal};

/// A `name = OP(args)` statement from a .bench file
type Statement = (String, String, Vec<String>);

fn inside_parens(line: &str) -> Result<String, String> {
    let open = line
        .find('(')
        .ok_or_else(|| format!("Invalid statement: {line}"))?;
    let close = line
        .rfind(')')
        .ok_or_else(|| format!("Invalid statement: {line}"))?;
    Ok(line[open + 1..close].trim().to_string())
}

fn make_gate(net: &mut Network, op: &str, sigs: &[Signal]) -> Result<Signal, String> {
    match op {
        "AND" => Ok(net.and_n(sigs)),
        "NAND" => Ok(!net.and_n(sigs)),
        "OR" => Ok(net.or_n(sigs)),
        "NOR" => Ok(!net.or_n(sigs)),
        "XOR" => Ok(net.xor_n(sigs)),
        "XNOR" => Ok(!net.xor_n(sigs)),
        "NOT" => {
            if sigs.len() != 1 {
                return Err("NOT expects a single input".to_string());
            }
            Ok(!sigs[0])
        }
        "BUF" | "BUFF" => {
            if sigs.len() != 1 {
                return Err("BUF expects a single input".to_string());
            }
            Ok(sigs[0])
        }
        "VDD" => Ok(Signal::one()),
        "GND" | "VSS" => Ok(Signal::zero()),
        "DFF" => Err("Sequential networks are not supported".to_string()),
        _ => Err(format!("Unknown gate type {op}")),
    }
}

/// Read a combinational network in .bench format
///
/// And/Or/Xor gates and their complements are supported with any number of
/// inputs; Or-style gates are lowered to And gates with inverted signals, and
/// Not/Buf statements resolve to signal aliases. Statements may come in any
/// order.
pub fn read_bench<R: Read>(r: R) -> Result<Network, String> {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut statements = Vec::<Statement>::new();
    for line in BufReader::new(r).lines() {
        let line = line.map_err(|e| e.to_string())?;
        let line = line.split('#').next().unwrap().trim().to_string();
        if line.is_empty() {
            continue;
        }
        let upper = line.to_uppercase();
        if upper.starts_with("INPUT(") {
            inputs.push(inside_parens(&line)?);
        } else if upper.starts_with("OUTPUT(") {
            outputs.push(inside_parens(&line)?);
        } else {
            let (name, expr) = line
                .split_once('=')
                .ok_or_else(|| format!("Invalid statement: {line}"))?;
            let expr = expr.trim();
            let open = expr
                .find('(')
                .ok_or_else(|| format!("Invalid statement: {line}"))?;
            let op = expr[..open].trim().to_uppercase();
            let args = inside_parens(expr)?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            statements.push((name.trim().to_string(), op, args));
        }
    }

    let mut net = Network::new();
    let mut name_to_sig = HashMap::new();
    for name in &inputs {
        name_to_sig.insert(name.clone(), net.add_input());
    }
    // ABC-style naming for constant signals
    name_to_sig
        .entry("vdd".to_string())
        .or_insert(Signal::one());
    name_to_sig
        .entry("gnd".to_string())
        .or_insert(Signal::zero());

    // Statements are resolved as their inputs become available, so that
    // aliases need no particular file order
    let mut remaining = statements;
    while !remaining.is_empty() {
        let mut next = Vec::new();
        let mut progress = false;
        for (name, op, args) in remaining {
            if args.iter().all(|a| name_to_sig.contains_key(a)) {
                let sigs: Vec<Signal> = args.iter().map(|a| name_to_sig[a]).collect();
                let s = make_gate(&mut net, &op, &sigs)?;
                name_to_sig.insert(name, s);
                progress = true;
            } else {
                next.push((name, op, args));
            }
        }
        if !progress {
            let missing = next.iter().map(|(name, _, _)| name).join(", ");
            return Err(format!("Could not resolve signals feeding: {missing}"));
        }
        remaining = next;
    }

    for o in &outputs {
        let s = name_to_sig
            .get(o)
            .ok_or_else(|| format!("Output {o} is not generated anywhere"))?;
        net.add_output(*s);
    }
    net.check();
    Ok(net)
}

fn signal_name(s: Signal) -> String {
    if s == Signal::zero() {
        "gnd".to_string()
    } else if s == Signal::one() {
        "vdd".to_string()
    } else if s.is_inverted() {
        format!("{}_n", s.without_inversion())
    } else {
        format!("{s}")
    }
}

/// Write a network in .bench format
pub fn write_bench<W: Write>(w: &mut W, net: &Network) {
    let mut used = Vec::new();
    for i in 0..net.nb_nodes() {
        used.extend(net.gate(i).dependencies());
    }
    for i in 0..net.nb_outputs() {
        used.push(net.output(i));
    }

    for i in 0..net.nb_inputs() {
        writeln!(w, "INPUT({})", net.input(i)).unwrap();
    }
    for i in 0..net.nb_outputs() {
        writeln!(w, "OUTPUT({})", signal_name(net.output(i))).unwrap();
    }
    if used.iter().any(|s| s.is_constant()) {
        writeln!(w, "vdd = VDD()").unwrap();
        writeln!(w, "gnd = GND()").unwrap();
    }
    // Not statements for complemented inputs, then each gate followed by its
    // Not statement when the complement is used
    for i in 0..net.nb_inputs() {
        let s = net.input(i);
        if used.contains(&!s) {
            writeln!(w, "{} = NOT({})", signal_name(!s), s).unwrap();
        }
    }
    for i in 0..net.nb_nodes() {
        let s = net.node(i);
        let op = if net.gate(i).is_and() { "AND" } else { "XOR" };
        let args = net
            .gate(i)
            .dependencies()
            .iter()
            .map(|d| signal_name(*d))
            .join(", ");
        writeln!(w, "{s} = {op}({args})").unwrap();
        if used.contains(&!s) {
            writeln!(w, "{} = NOT({})", signal_name(!s), s).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{read_bench, write_bench};

    #[test]
    fn test_read() {
        let example = "# A small example\n\
            INPUT(a)\n\
            INPUT(b)\n\
            INPUT(c)\n\
            OUTPUT(o)\n\
            t = AND(a, b, nc)\n\
            nc = NOT(c)\n\
            o = XOR(t, c)\n";
        let net = read_bench(example.as_bytes()).unwrap();
        assert_eq!(net.nb_inputs(), 3);
        assert_eq!(net.nb_outputs(), 1);
        assert_eq!(net.nb_nodes(), 3);
        assert!(net.is_topo_sorted());
    }

    #[test]
    fn test_read_or() {
        let example = "INPUT(a)\nINPUT(b)\nOUTPUT(o)\no = NOR(a, b)\n";
        let net = read_bench(example.as_bytes()).unwrap();
        // Lowered to a single And over inverted inputs
        assert_eq!(net.nb_nodes(), 1);
        assert!(net.gate(0).is_and());
        assert!(!net.output(0).is_inverted());
    }

    #[test]
    fn test_read_constants() {
        let example = "INPUT(a)\nOUTPUT(o)\no = AND(a, vdd)\n";
        let net = read_bench(example.as_bytes()).unwrap();
        assert_eq!(net.nb_nodes(), 1);
    }

    #[test]
    fn test_read_unresolved() {
        let example = "INPUT(a)\nOUTPUT(o)\no = AND(a, t)\n";
        assert!(read_bench(example.as_bytes()).is_err());
    }

    #[test]
    fn test_read_sequential() {
        let example = "INPUT(a)\nOUTPUT(o)\no = DFF(a)\n";
        assert!(read_bench(example.as_bytes()).is_err());
    }

    #[test]
    fn test_roundtrip() {
        let mut net = crate::Network::new();
        let i0 = net.add_input();
        let i1 = net.add_input();
        let a = net.and(i0, !i1);
        let x = net.xor(a, i1);
        net.add_output(!x);

        let mut buf = Vec::new();
        write_bench(&mut buf, &net);
        let read = read_bench(buf.as_slice()).unwrap();
        assert_eq!(read.nb_inputs(), net.nb_inputs());
        assert_eq!(read.nb_outputs(), net.nb_outputs());
        assert_eq!(read.nb_nodes(), net.nb_nodes());
        assert!(read.output(0).is_inverted());
    }
}
