//! The owning schematic: entities, channels, constraints.

use std::collections::HashMap;

use mf_core::{ChannelId, EntityId, Real};
use serde::Serialize;

use crate::constraint::UserConstraint;
use crate::entities::{
    Channel, ChannelSpec, Entity, Node, NodeKind, Port, PortKind, PortSpec,
};
use crate::error::{SchematicError, SchematicResult};
use crate::validate;

/// Planar extent of the chip: positions of every entity are constrained to
/// lie inside this rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChipBounds {
    pub x_min: Real,
    pub y_min: Real,
    pub x_max: Real,
    pub y_max: Real,
}

/// A microfluidic circuit under construction.
///
/// Entities (ports and nodes) live in one insertion-ordered arena sharing a
/// single namespace; channels reference entities by resolved id. A rejected
/// builder call leaves the schematic exactly as it was. Iteration order of
/// every collection is insertion order, which makes compilation (and hence
/// solver queries) reproducible.
#[derive(Debug, Default)]
pub struct Schematic {
    chip: Option<ChipBounds>,
    entities: Vec<Entity>,
    names: HashMap<String, EntityId>,
    channels: Vec<Channel>,
    edges: HashMap<(EntityId, EntityId), ChannelId>,
    constraints: Vec<UserConstraint>,
}

impl Schematic {
    pub fn new() -> Self {
        Self::default()
    }

    /// A schematic whose entities must sit inside `[x_min, y_min, x_max, y_max]` (m).
    pub fn with_chip(dim: [Real; 4]) -> SchematicResult<Self> {
        let [x_min, y_min, x_max, y_max] = dim;
        let finite = dim.iter().all(|v| v.is_finite());
        if !finite || x_min >= x_max || y_min >= y_max {
            return Err(SchematicError::InvalidChipBounds);
        }
        Ok(Self {
            chip: Some(ChipBounds {
                x_min,
                y_min,
                x_max,
                y_max,
            }),
            ..Self::default()
        })
    }

    /// Add a boundary port. Fails on duplicate names or non-positive
    /// declared values; the schematic is unchanged on failure.
    pub fn add_port(
        &mut self,
        name: &str,
        kind: PortKind,
        spec: PortSpec,
    ) -> SchematicResult<EntityId> {
        self.check_name_free(name)?;
        validate::check_positive_opt(spec.fixed_pressure, "port pressure")?;
        validate::check_positive_opt(spec.fixed_flow_rate, "port flow rate")?;
        validate::check_position(spec.position, "port position")?;

        Ok(self.insert_entity(Entity::Port(Port {
            name: name.to_string(),
            kind,
            fixed_pressure: spec.fixed_pressure,
            fixed_flow_rate: spec.fixed_flow_rate,
            fluid: spec.fluid,
            position: spec.position,
        })))
    }

    /// Add an internal node. An unknown kind is accepted here and rejected
    /// at compile time, so rule coverage is checked in exactly one place.
    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> SchematicResult<EntityId> {
        self.check_name_free(name)?;
        Ok(self.insert_entity(Entity::Node(Node {
            name: name.to_string(),
            kind,
            position: None,
        })))
    }

    /// Add an internal node with a pinned position (m).
    pub fn add_node_at(
        &mut self,
        name: &str,
        kind: NodeKind,
        position: [Real; 2],
    ) -> SchematicResult<EntityId> {
        self.check_name_free(name)?;
        validate::check_position(Some(position), "node position")?;
        Ok(self.insert_entity(Entity::Node(Node {
            name: name.to_string(),
            kind,
            position: Some(position),
        })))
    }

    /// Add a directed channel between two existing entities.
    ///
    /// Both endpoints must already exist (no implicit creation), ports must
    /// stay leaves, and at most one channel may join a (from, to) pair.
    pub fn add_channel(
        &mut self,
        from: &str,
        to: &str,
        spec: ChannelSpec,
    ) -> SchematicResult<ChannelId> {
        let from_id = self.resolve_endpoint(from, to, from)?;
        let to_id = self.resolve_endpoint(from, to, to)?;

        if let Entity::Port(p) = &self.entities[to_id.index() as usize] {
            if p.kind == PortKind::Input {
                return Err(SchematicError::PortNotLeaf {
                    name: p.name.clone(),
                    what: "channels cannot flow into an input port",
                });
            }
        }
        if let Entity::Port(p) = &self.entities[from_id.index() as usize] {
            if p.kind == PortKind::Output {
                return Err(SchematicError::PortNotLeaf {
                    name: p.name.clone(),
                    what: "channels cannot flow out of an output port",
                });
            }
        }
        if self.edges.contains_key(&(from_id, to_id)) {
            return Err(SchematicError::DuplicateChannel {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        validate::check_positive_opt(spec.min_length, "channel min length")?;
        validate::check_positive_opt(spec.min_width, "channel min width")?;
        validate::check_positive_opt(spec.min_height, "channel min height")?;

        let id = ChannelId::from_index(self.channels.len() as u32);
        self.channels.push(Channel {
            name: format!("{from}_{to}"),
            from_name: from.to_string(),
            to_name: to.to_string(),
            from: from_id,
            to: to_id,
            shape: spec.shape,
            phase: spec.phase,
            min_length: spec.min_length,
            min_width: spec.min_width,
            min_height: spec.min_height,
        });
        self.edges.insert((from_id, to_id), id);
        Ok(id)
    }

    /// Add a user constraint. Every referenced entity name must resolve to
    /// a port, node or channel of this schematic.
    pub fn add_constraint(&mut self, constraint: UserConstraint) -> SchematicResult<()> {
        for q in constraint.quantities() {
            let known = self.names.contains_key(&q.entity)
                || self.channels.iter().any(|c| c.name == q.entity);
            if !known {
                return Err(SchematicError::UnknownReference {
                    name: q.entity.clone(),
                });
            }
        }
        self.constraints.push(constraint);
        Ok(())
    }

    // ---- read access ----

    pub fn chip(&self) -> Option<ChipBounds> {
        self.chip
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.index() as usize]
    }

    pub fn entity_by_name(&self, name: &str) -> Option<(EntityId, &Entity)> {
        let id = *self.names.get(name)?;
        Some((id, &self.entities[id.index() as usize]))
    }

    pub fn ports(&self) -> impl Iterator<Item = (EntityId, &Port)> {
        self.entities.iter().enumerate().filter_map(|(i, e)| {
            e.as_port().map(|p| (EntityId::from_index(i as u32), p))
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = (EntityId, &Node)> {
        self.entities.iter().enumerate().filter_map(|(i, e)| {
            e.as_node().map(|n| (EntityId::from_index(i as u32), n))
        })
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[id.index() as usize]
    }

    pub fn constraints(&self) -> &[UserConstraint] {
        &self.constraints
    }

    /// Channels directed into the given entity, in insertion order.
    pub fn channels_in(&self, id: EntityId) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(move |c| c.to == id)
    }

    /// Channels directed out of the given entity, in insertion order.
    pub fn channels_out(&self, id: EntityId) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(move |c| c.from == id)
    }

    /// Number of channels attached to the entity (either direction).
    pub fn degree(&self, id: EntityId) -> usize {
        self.channels
            .iter()
            .filter(|c| c.from == id || c.to == id)
            .count()
    }

    // ---- internals ----

    fn check_name_free(&self, name: &str) -> SchematicResult<()> {
        if self.names.contains_key(name) {
            return Err(SchematicError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert_entity(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::from_index(self.entities.len() as u32);
        self.names.insert(entity.name().to_string(), id);
        self.entities.push(entity);
        id
    }

    fn resolve_endpoint(&self, from: &str, to: &str, name: &str) -> SchematicResult<EntityId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SchematicError::UnknownEndpoint {
                from: from.to_string(),
                to: to.to_string(),
                name: name.to_string(),
            })
    }
}
