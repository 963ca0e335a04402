//! Deterrent index: placed point sources plus circular threat fields.
//!
//! # Layout
//!
//! Point sources (campfires, dropped torches, burning flares) sit in an
//! R-tree (via `rstar`) keyed on their horizontal position, so the
//! negotiator's "nearest fire to me" query does not scan every source.
//! Source and field records live in slot `Vec`s indexed by their ids.
//!
//! Threat fields are few and large; they are scanned linearly.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wl_core::{FieldId, SourceId, ThreatCategory, Vec3};

use crate::{WorldError, WorldResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq)]
struct SourceEntry {
    point: [f32; 2], // [x, z]
    id:    SourceId,
}

impl RTreeObject for SourceEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SourceEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

#[inline]
fn flat(p: Vec3) -> [f32; 2] {
    [p.x, p.z]
}

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct DeterrentSource {
    pub id:       SourceId,
    pub category: ThreatCategory,
    pub position: Vec3,
    /// A doused fire or burnt-out flare stays indexed but inert.
    pub active:   bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FieldKind {
    Hazard,
    SafeHaven,
}

impl FieldKind {
    /// The threat category a field of this kind feeds.
    pub fn category(self) -> ThreatCategory {
        match self {
            FieldKind::Hazard    => ThreatCategory::HazardField,
            FieldKind::SafeHaven => ThreatCategory::SafeHaven,
        }
    }
}

/// A circular zone on the horizontal plane.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreatField {
    pub id:     FieldId,
    pub kind:   FieldKind,
    pub center: Vec3,
    pub radius: f32,
    pub active: bool,
}

impl ThreatField {
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        self.center.flat_distance(p) <= self.radius
    }
}

// ── ThreatMap ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct ThreatMap {
    sources: Vec<Option<DeterrentSource>>,
    index:   RTree<SourceEntry>,
    fields:  Vec<Option<ThreatField>>,
}

impl ThreatMap {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Point sources ─────────────────────────────────────────────────────

    /// Place a deterrent.  Field categories and active struggles are not
    /// point sources and are rejected.
    pub fn add_source(&mut self, category: ThreatCategory, position: Vec3) -> WorldResult<SourceId> {
        if category.is_field() || category == ThreatCategory::ActiveStruggle {
            return Err(WorldError::NotASource(category));
        }
        let id = SourceId(self.sources.len() as u32);
        self.sources.push(Some(DeterrentSource { id, category, position, active: true }));
        self.index.insert(SourceEntry { point: flat(position), id });
        Ok(id)
    }

    pub fn remove_source(&mut self, id: SourceId) -> WorldResult<DeterrentSource> {
        let source = self
            .sources
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(WorldError::SourceNotFound(id))?;
        self.index.remove(&SourceEntry { point: flat(source.position), id });
        Ok(source)
    }

    pub fn set_source_active(&mut self, id: SourceId, active: bool) -> WorldResult<()> {
        let source = self
            .sources
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(WorldError::SourceNotFound(id))?;
        source.active = active;
        Ok(())
    }

    pub fn source(&self, id: SourceId) -> Option<&DeterrentSource> {
        self.sources.get(id.index()).and_then(Option::as_ref)
    }

    /// Nearest active source of `category` and its horizontal distance.
    pub fn nearest(&self, category: ThreatCategory, pos: Vec3) -> Option<(&DeterrentSource, f32)> {
        self.index
            .nearest_neighbor_iter(&flat(pos))
            .filter_map(|e| self.source(e.id))
            .find(|s| s.active && s.category == category)
            .map(|s| (s, s.position.flat_distance(pos)))
    }

    pub fn source_count(&self) -> usize {
        self.index.size()
    }

    // ── Fields ────────────────────────────────────────────────────────────

    pub fn add_field(&mut self, kind: FieldKind, center: Vec3, radius: f32) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        self.fields.push(Some(ThreatField { id, kind, center, radius, active: true }));
        id
    }

    pub fn remove_field(&mut self, id: FieldId) -> WorldResult<ThreatField> {
        self.fields
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(WorldError::FieldNotFound(id))
    }

    pub fn set_field_active(&mut self, id: FieldId, active: bool) -> WorldResult<()> {
        let field = self
            .fields
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(WorldError::FieldNotFound(id))?;
        field.active = active;
        Ok(())
    }

    /// The first active field of `kind` that contains `pos`.
    pub fn containing_field(&self, pos: Vec3, kind: FieldKind) -> Option<&ThreatField> {
        self.fields
            .iter()
            .filter_map(Option::as_ref)
            .find(|f| f.active && f.kind == kind && f.contains(pos))
    }

    /// `true` if `pos` stands inside any active hazard field.
    pub fn in_hazard(&self, pos: Vec3) -> bool {
        self.containing_field(pos, FieldKind::Hazard).is_some()
    }
}
