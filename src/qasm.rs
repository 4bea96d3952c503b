//! OpenQASM 2.0 export.
//!
//! Output is byte-stable for supported gates:
//!
//! ```text
//! OPENQASM 2.0;
//! include "qelib1.inc";
//! qreg q[2];
//! h q[0];
//! cx q[0],q[1];
//! ```
//!
//! Qubit `k` of the simulator is `q[k]`. Statements follow the input order.
use crate::circuit::{Operation, ResolvedGate};
use crate::config::HARD_QUBIT_LIMIT;
use crate::error::{Result, SimError};

pub const QASM_HEADER: &str = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\n";

/// Serialize `operations` on a `num_qubits` register as OpenQASM 2.0.
///
/// Fails without producing partial output if any operation cannot be
/// translated or references a qubit outside the register.
pub fn circuit_to_qasm(operations: &[Operation], num_qubits: usize) -> Result<String> {
    if num_qubits == 0 {
        return Err(SimError::InvalidDimension { requested: 0, max: HARD_QUBIT_LIMIT });
    }

    let mut out = String::with_capacity(QASM_HEADER.len() + 16 * (operations.len() + 1));
    out.push_str(QASM_HEADER);
    out.push_str(&format!("qreg q[{num_qubits}];\n"));

    for op in operations {
        let line = match op.check(num_qubits)? {
            ResolvedGate::Single { gate, target } => format!("{} q[{target}];\n", gate.qasm()),
            ResolvedGate::Controlled { gate, control, target } => {
                format!("{} q[{control}],q[{target}];\n", gate.qasm())
            }
        };
        out.push_str(&line);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gates::{ControlledGate, Gate};

    #[test]
    fn test_bell_circuit_exact_text() {
        let ops = vec![
            Operation::single(Gate::H, 0, 0),
            Operation::controlled(ControlledGate::Cnot, 0, 1, 1),
        ];
        let qasm = circuit_to_qasm(&ops, 2).unwrap();
        assert_eq!(
            qasm,
            "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\nh q[0];\ncx q[0],q[1];\n"
        );
    }

    #[test]
    fn test_every_mnemonic() {
        let mut ops: Vec<Operation> =
            Gate::ALL.iter().map(|&g| Operation::single(g, 0, 0)).collect();
        ops.extend(ControlledGate::ALL.iter().map(|&c| Operation::controlled(c, 1, 0, 1)));
        let qasm = circuit_to_qasm(&ops, 2).unwrap();
        let body: Vec<&str> = qasm.lines().skip(3).collect();
        assert_eq!(
            body,
            vec![
                "id q[0];", "h q[0];", "x q[0];", "y q[0];", "z q[0];", "s q[0];", "t q[0];",
                "cx q[1],q[0];", "cy q[1],q[0];", "cz q[1],q[0];", "ch q[1],q[0];",
            ]
        );
    }

    #[test]
    fn test_empty_circuit_has_header_and_register() {
        let qasm = circuit_to_qasm(&[], 3).unwrap();
        assert_eq!(qasm, format!("{QASM_HEADER}qreg q[3];\n"));
    }

    #[test]
    fn test_uncontrollable_gate_is_unsupported() {
        let mut op = Operation::single(Gate::S, 1, 0);
        op.control = Some(0);
        assert!(matches!(circuit_to_qasm(&[op], 2), Err(SimError::UnsupportedGate(_))));
    }

    #[test]
    fn test_out_of_range_qubit() {
        let ops = vec![Operation::single(Gate::H, 2, 0)];
        assert!(matches!(
            circuit_to_qasm(&ops, 2),
            Err(SimError::InvalidQubitIndex { index: 2, .. })
        ));
    }

    #[test]
    fn test_zero_qubits() {
        assert!(matches!(circuit_to_qasm(&[], 0), Err(SimError::InvalidDimension { .. })));
    }

    #[test]
    fn test_time_does_not_reorder() {
        let ops = vec![Operation::single(Gate::X, 0, 3), Operation::single(Gate::H, 0, 0)];
        let qasm = circuit_to_qasm(&ops, 1).unwrap();
        assert!(qasm.ends_with("x q[0];\nh q[0];\n"));
    }
}
