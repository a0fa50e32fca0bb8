//! Rules specific to droplet-generating T-junctions.
//!
//! A T-junction must have exactly two inbound channels carrying the
//! continuous and dispersed phases, and one outbound channel carrying the
//! output phase. The continuous run goes straight through the junction and
//! the droplet volume of the outbound channel follows the van Steijn model.

use mf_core::{EntityId, Real};
use mf_expr::{Attribute, Expr, Formula};
use mf_rules::{droplet, geometry};
use mf_schematic::{Channel, Phase};

use crate::compile::Compiler;
use crate::error::{CompileError, CompileResult};

/// Channels meeting at the junction must cross at no less than this angle
/// (degrees) for droplets to pinch off.
const CRIT_CROSSING_ANGLE_DEG: Real = 0.5;

pub(crate) fn emit(c: &mut Compiler<'_>, id: EntityId, node: &str) -> CompileResult<()> {
    let sch = c.sch;
    let malformed = |reason: &'static str| CompileError::MalformedJunction {
        node: node.to_string(),
        reason,
    };

    let inbound: Vec<&Channel> = sch.channels_in(id).collect();
    let outbound: Vec<&Channel> = sch.channels_out(id).collect();
    if inbound.len() != 2 || outbound.len() != 1 {
        return Err(malformed("expected two inbound channels and one outbound"));
    }
    let continuous = *inbound
        .iter()
        .find(|ch| ch.phase == Phase::Continuous)
        .ok_or_else(|| malformed("no inbound continuous-phase channel"))?;
    let dispersed = *inbound
        .iter()
        .find(|ch| ch.phase == Phase::Dispersed)
        .ok_or_else(|| malformed("no inbound dispersed-phase channel"))?;
    let output = outbound[0];
    if output.phase != Phase::Output {
        return Err(malformed("outbound channel must carry the output phase"));
    }

    // Continuous and output channels share a cross section; the dispersed
    // inlet matches their height.
    let w_c = c.var(&continuous.name, Attribute::Width);
    let w_out = c.var(&output.name, Attribute::Width);
    c.emit(Formula::eq(w_c.clone(), w_out));
    let h_c = c.var(&continuous.name, Attribute::Height);
    let h_out = c.var(&output.name, Attribute::Height);
    c.emit(Formula::eq(h_c.clone(), h_out.clone()));
    let h_d = c.var(&dispersed.name, Attribute::Height);
    c.emit(Formula::eq(h_d, h_out));

    // The continuous phase wets the junction, so its viscosity is what
    // the outlet channel picks up and hands downstream.
    let mu_node = c.var(node, Attribute::Viscosity);
    let mu_c = c.var(&continuous.name, Attribute::Viscosity);
    c.emit(Formula::eq(mu_node, mu_c));

    // Corner sharpness scales with the continuous width.
    let eps = c.var(node, Attribute::Sharpness);
    c.emit(droplet::sharpness(eps.clone(), w_c.clone()));

    // Predicted droplet volume leaves through the output channel.
    let volume = c.var(&output.name, Attribute::DropletVolume);
    let w_in = c.var(&dispersed.name, Attribute::Width);
    let q_d = c.var(&dispersed.name, Attribute::FlowRate);
    let q_c = c.var(&continuous.name, Attribute::FlowRate);
    c.emit(droplet::droplet_volume(volume, h_c, w_c, w_in, eps, q_d, q_c));

    // Layout: continuous source, junction and output destination lie on a
    // straight line, and each channel pair crosses at no less than the
    // critical angle.
    let src = pos(c, &continuous.from_name);
    let mid = pos(c, node);
    let dst = pos(c, &output.to_name);
    let disp = pos(c, &dispersed.from_name);
    c.emit(geometry::collinear(src.clone(), mid.clone(), dst.clone()));

    let cos_sq = CRIT_CROSSING_ANGLE_DEG.to_radians().cos().powi(2);
    c.emit(geometry::crit_angle_bound(
        src.clone(),
        mid.clone(),
        disp.clone(),
        cos_sq,
    ));
    c.emit(geometry::crit_angle_bound(src, mid.clone(), dst.clone(), cos_sq));
    c.emit(geometry::crit_angle_bound(dst, mid, disp, cos_sq));
    Ok(())
}

fn pos(c: &mut Compiler<'_>, entity: &str) -> (Expr, Expr) {
    (c.var(entity, Attribute::X), c.var(entity, Attribute::Y))
}
