//! Reports about nodes the serializer could not interpret.

use rhizome_ptree_ir::{Node, NodeKind};

/// A node of a kind without a serialization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnhandledNode {
    pub kind: NodeKind,
    /// Which of the three slots held something.
    pub slots_present: [bool; 3],
}

impl UnhandledNode {
    pub fn of(node: &Node) -> Self {
        Self {
            kind: node.kind,
            slots_present: [node.has_slot(0), node.has_slot(1), node.has_slot(2)],
        }
    }

    pub fn raw_id(&self) -> u16 {
        self.kind.id()
    }
}

pub trait Diagnostics {
    fn unhandled(&mut self, report: UnhandledNode);
}

/// Logs every report through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn unhandled(&mut self, report: UnhandledNode) {
        let [u1, u2, u3] = report.slots_present;
        tracing::warn!(
            kind = %report.kind,
            raw_id = report.raw_id(),
            u1,
            u2,
            u3,
            "unhandled node kind"
        );
    }
}

impl Diagnostics for Vec<UnhandledNode> {
    fn unhandled(&mut self, report: UnhandledNode) {
        self.push(report);
    }
}
