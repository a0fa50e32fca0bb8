//! Mass conservation.

use mf_expr::{Expr, Formula};

/// Kirchhoff continuity at a node: total inflow equals total outflow.
/// Either side may be empty and sums to zero, so an isolated node yields
/// the trivially true `0 = 0`.
pub fn continuity(inflows: Vec<Expr>, outflows: Vec<Expr>) -> Formula {
    Formula::eq(Expr::sum(inflows), Expr::sum(outflows))
}

/// A port's own flow variable equals the sum of flows through its
/// attached channels.
pub fn flow_balance(port_flow: Expr, channel_flows: Vec<Expr>) -> Formula {
    Formula::eq(port_flow, Expr::sum(channel_flows))
}
