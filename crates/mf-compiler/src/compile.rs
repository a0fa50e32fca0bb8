//! Lowering a schematic into a flat constraint system.
//!
//! Compilation walks the schematic in insertion order: ports first, then
//! nodes (continuity plus kind-specific rules), then channels, then user
//! constraints. Variables are allocated lazily through the registry, so
//! the variable set and the formula sequence are a deterministic function
//! of the schematic state.

use mf_core::{Real, Tolerances};
use mf_expr::{Attribute, ConstraintSystem, Expr, Formula, VariableRegistry};
use mf_rules::{continuity, geometry, hydraulics};
use mf_schematic::{Channel, ChannelShape, ConstraintExpr, NodeKind, PortKind, Schematic};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::tjunction;

/// Compile a schematic into a constraint system ready for a solving
/// engine. Fails fast on elements with no registered rule set and on
/// constraints over quantities no rule ever touched.
pub fn compile(schematic: &Schematic) -> CompileResult<ConstraintSystem> {
    let mut c = Compiler {
        sch: schematic,
        reg: VariableRegistry::new(),
        formulas: Vec::new(),
    };
    c.check_boundary()?;
    c.emit_ports();
    c.emit_nodes()?;
    c.emit_channels()?;
    c.lower_constraints()?;
    debug!(
        variables = c.reg.len(),
        formulas = c.formulas.len(),
        "schematic compiled"
    );
    Ok(ConstraintSystem::new(c.reg, c.formulas, Tolerances::default()))
}

pub(crate) struct Compiler<'a> {
    pub(crate) sch: &'a Schematic,
    pub(crate) reg: VariableRegistry,
    pub(crate) formulas: Vec<Formula>,
}

impl Compiler<'_> {
    /// Variable expression for (entity, attribute), allocated on first use
    /// with the attribute's default physical envelope.
    pub(crate) fn var(&mut self, entity: &str, attr: Attribute) -> Expr {
        Expr::var(self.reg.variable_for(entity, attr, attr.default_domain()))
    }

    pub(crate) fn emit(&mut self, f: Formula) {
        self.formulas.push(f);
    }

    fn emit_all(&mut self, fs: impl IntoIterator<Item = Formula>) {
        self.formulas.extend(fs);
    }

    /// A circuit must have at least one port of each direction, and every
    /// port must touch a channel.
    fn check_boundary(&self) -> CompileResult<()> {
        let mut has_input = false;
        let mut has_output = false;
        for (id, port) in self.sch.ports() {
            match port.kind {
                PortKind::Input => has_input = true,
                PortKind::Output => has_output = true,
            }
            if self.sch.degree(id) == 0 {
                return Err(CompileError::DisconnectedPort {
                    port: port.name.clone(),
                });
            }
        }
        if !has_input {
            return Err(CompileError::NoInputPort);
        }
        if !has_output {
            return Err(CompileError::NoOutputPort);
        }
        Ok(())
    }

    /// Position variables plus pin/chip formulas, shared by ports and nodes.
    fn place(&mut self, name: &str, position: Option<[Real; 2]>) {
        let x = self.var(name, Attribute::X);
        let y = self.var(name, Attribute::Y);
        if let Some([px, py]) = position {
            self.emit(Formula::eq(x.clone(), Expr::constant(px)));
            self.emit(Formula::eq(y.clone(), Expr::constant(py)));
        }
        if let Some(chip) = self.sch.chip() {
            self.emit_all(geometry::within_chip(
                x, y, chip.x_min, chip.y_min, chip.x_max, chip.y_max,
            ));
        }
    }

    fn emit_ports(&mut self) {
        let sch = self.sch;
        for (id, port) in sch.ports() {
            self.place(&port.name, port.position);

            let p = self.var(&port.name, Attribute::Pressure);
            if let Some(pa) = port.fixed_pressure {
                self.emit(Formula::eq(p.clone(), Expr::constant(pa)));
            }
            // Declared fluid properties pin their variables. Undeclared
            // ones are not allocated here; the inflow estimate and the
            // channel hand-off allocate exactly what they constrain.
            if let Some(kgm3) = port.fluid.density {
                let rho = self.var(&port.name, Attribute::Density);
                self.emit(Formula::eq(rho, Expr::constant(kgm3)));
            }
            if let Some(pas) = port.fluid.viscosity {
                let mu = self.var(&port.name, Attribute::Viscosity);
                self.emit(Formula::eq(mu, Expr::constant(pas)));
            }

            // Ports are leaves: inputs only feed channels, outputs only
            // drain them.
            let attached: Vec<&Channel> = match port.kind {
                PortKind::Input => sch.channels_out(id).collect(),
                PortKind::Output => sch.channels_in(id).collect(),
            };
            let q = self.var(&port.name, Attribute::FlowRate);
            let flows: Vec<Expr> = attached
                .iter()
                .map(|ch| self.var(&ch.name, Attribute::FlowRate))
                .collect();
            self.emit(continuity::flow_balance(q.clone(), flows));

            if let Some(m3s) = port.fixed_flow_rate {
                self.emit(Formula::eq(q, Expr::constant(m3s)));
            } else if port.kind == PortKind::Input {
                // No declared inflow: estimate it from the driving pressure
                // over the summed cross-section of the outgoing channels.
                let rho = self.var(&port.name, Attribute::Density);
                let sections: Vec<Expr> = attached
                    .iter()
                    .map(|ch| {
                        self.var(&ch.name, Attribute::Width)
                            * self.var(&ch.name, Attribute::Height)
                    })
                    .collect();
                self.emit(hydraulics::port_inflow(q, p, rho, Expr::sum(sections)));
            }
        }
    }

    fn emit_nodes(&mut self) -> CompileResult<()> {
        let sch = self.sch;
        for (id, node) in sch.nodes() {
            if let NodeKind::Other(kind) = &node.kind {
                return Err(CompileError::UnsupportedNodeKind {
                    node: node.name.clone(),
                    kind: kind.clone(),
                });
            }
            self.place(&node.name, node.position);
            self.var(&node.name, Attribute::Pressure);

            // Exactly one continuity equation per node. An isolated node
            // degenerates to the vacuous 0 = 0.
            let inflows: Vec<Expr> = sch
                .channels_in(id)
                .map(|ch| self.var(&ch.name, Attribute::FlowRate))
                .collect();
            let outflows: Vec<Expr> = sch
                .channels_out(id)
                .map(|ch| self.var(&ch.name, Attribute::FlowRate))
                .collect();
            self.emit(continuity::continuity(inflows, outflows));

            // A node fed from one upstream entity carries that entity's
            // density; viscosity arrives through the channel hand-off.
            let mut upstream: Vec<&str> = Vec::new();
            for ch in sch.channels_in(id) {
                if !upstream.contains(&ch.from_name.as_str()) {
                    upstream.push(&ch.from_name);
                }
            }
            if let [up] = upstream[..] {
                let rho_node = self.var(&node.name, Attribute::Density);
                let rho_up = self.var(up, Attribute::Density);
                self.emit(Formula::eq(rho_node, rho_up));
            }

            if node.kind == NodeKind::TJunction {
                tjunction::emit(self, id, &node.name)?;
            }
        }
        Ok(())
    }

    fn emit_channels(&mut self) -> CompileResult<()> {
        let sch = self.sch;
        for ch in sch.channels() {
            if let ChannelShape::Other(shape) = &ch.shape {
                return Err(CompileError::UnsupportedChannelShape {
                    channel: ch.name.clone(),
                    shape: shape.clone(),
                });
            }
            let length = self.var(&ch.name, Attribute::Length);
            let width = self.var(&ch.name, Attribute::Width);
            let height = self.var(&ch.name, Attribute::Height);
            let flow = self.var(&ch.name, Attribute::FlowRate);
            let resistance = self.var(&ch.name, Attribute::Resistance);

            // Declared geometry floors are lower bounds, not pins.
            if let Some(m) = ch.min_length {
                self.emit(geometry::min_floor(length.clone(), m));
            }
            if let Some(m) = ch.min_width {
                self.emit(geometry::min_floor(width.clone(), m));
            }
            if let Some(m) = ch.min_height {
                self.emit(geometry::min_floor(height.clone(), m));
            }

            let x1 = self.var(&ch.from_name, Attribute::X);
            let y1 = self.var(&ch.from_name, Attribute::Y);
            let x2 = self.var(&ch.to_name, Attribute::X);
            let y2 = self.var(&ch.to_name, Attribute::Y);
            self.emit(geometry::pythagorean_length(x1, y1, x2, y2, length.clone()));

            // The channel carries whatever flows in from its source and
            // hands the same fluid on to its destination. T-junctions are
            // exempt from the hand-off: the junction's fluid comes from
            // its phase tagging, not from each inbound channel.
            let mu = self.var(&ch.name, Attribute::Viscosity);
            let mu_src = self.var(&ch.from_name, Attribute::Viscosity);
            self.emit(Formula::eq(mu.clone(), mu_src.clone()));
            let junction_dst = sch
                .entity(ch.to)
                .as_node()
                .is_some_and(|n| n.kind == NodeKind::TJunction);
            if !junction_dst {
                let mu_dst = self.var(&ch.to_name, Attribute::Viscosity);
                self.emit(Formula::eq(mu_dst, mu_src));
            }

            self.emit_all(hydraulics::rectangular_resistance(
                resistance.clone(),
                mu,
                length,
                width,
                height,
            ));

            let p_from = self.var(&ch.from_name, Attribute::Pressure);
            let p_to = self.var(&ch.to_name, Attribute::Pressure);
            self.emit(hydraulics::pressure_flow(p_from, p_to, flow, resistance));
        }
        Ok(())
    }

    fn lower_constraints(&mut self) -> CompileResult<()> {
        let sch = self.sch;
        for uc in sch.constraints() {
            let lhs = self.lower_expr(&uc.lhs)?;
            let rhs = self.lower_expr(&uc.rhs)?;
            self.emit(Formula::new(lhs, uc.op, rhs));
        }
        Ok(())
    }

    /// Resolve a user expression onto registered variables. Constraints
    /// never allocate: a quantity no rule touched is an error.
    fn lower_expr(&self, e: &ConstraintExpr) -> CompileResult<Expr> {
        Ok(match e {
            ConstraintExpr::Const(c) => Expr::constant(*c),
            ConstraintExpr::Quantity(q) => {
                let id = self.reg.lookup(&q.entity, q.attr).ok_or_else(|| {
                    CompileError::UnregisteredQuantity {
                        entity: q.entity.clone(),
                        attr: q.attr.key(),
                    }
                })?;
                Expr::var(id)
            }
            ConstraintExpr::Neg(a) => -self.lower_expr(a)?,
            ConstraintExpr::Add(a, b) => self.lower_expr(a)? + self.lower_expr(b)?,
            ConstraintExpr::Sub(a, b) => self.lower_expr(a)? - self.lower_expr(b)?,
            ConstraintExpr::Mul(a, b) => self.lower_expr(a)? * self.lower_expr(b)?,
            ConstraintExpr::Div(a, b) => self.lower_expr(a)? / self.lower_expr(b)?,
            ConstraintExpr::Pow(a, n) => self.lower_expr(a)?.powi(*n),
            ConstraintExpr::Sqrt(a) => self.lower_expr(a)?.sqrt(),
        })
    }
}
