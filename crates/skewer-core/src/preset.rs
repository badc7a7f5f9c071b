use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::affine::Affine2;
use crate::ops::Op;
use crate::point::Point2;

/// A trigger slot, `1..=9` (the number-row keys).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Trigger(u8);

impl Trigger {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    /// `None` for ids outside `1..=9`.
    pub fn new(id: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&id).then_some(Self(id))
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Trigger> {
        (Self::MIN..=Self::MAX).map(Trigger)
    }
}

impl TryFrom<u8> for Trigger {
    type Error = String;
    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id).ok_or_else(|| format!("trigger id {id} is outside 1..=9"))
    }
}

impl From<Trigger> for u8 {
    fn from(t: Trigger) -> u8 {
        t.0
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered primitives bound to one trigger. Order matters: the steps do not commute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub trigger: Trigger,
    pub ops: Vec<Op>,
}

impl Preset {
    pub fn new(trigger: Trigger, ops: Vec<Op>) -> Self {
        Self { trigger, ops }
    }

    /// The whole preset folded into one matrix, for the given pivot.
    pub fn matrix(&self, pivot: Point2) -> Affine2 {
        self.ops
            .iter()
            .fold(Affine2::identity(), |acc, op| op.matrix(pivot).then(&acc))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.trigger)?;
        for (i, op) in self.ops.iter().enumerate() {
            let sep = if i == 0 { " " } else { " -> " };
            write!(f, "{sep}{op}")?;
        }
        Ok(())
    }
}

/// Trigger -> preset lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresetTable {
    presets: BTreeMap<Trigger, Preset>,
}

fn slot(id: u8, ops: Vec<Op>) -> Preset {
    Preset::new(Trigger(id), ops)
}

impl PresetTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The nine built-in presets.
    ///
    /// `ReflectHorizontal` negates the pivot-relative y, `ReflectVertical` the x.
    pub fn standard() -> Self {
        use Op::*;
        Self::from_presets([
            slot(1, vec![Scale { sx: 0.5, sy: 0.75 }]),
            slot(2, vec![Rotate { degrees: 24.0 }]),
            slot(3, vec![Scale { sx: 0.5, sy: 1.0 }, ReflectHorizontal]),
            slot(4, vec![Shear { shx: 0.25, shy: 0.0 }]),
            slot(
                5,
                vec![Translate { dx: 0.0, dy: -148.0 * 3.0 }, Scale { sx: 2.0, sy: 0.5 }],
            ),
            slot(6, vec![Shear { shx: 0.25, shy: 0.0 }, Rotate { degrees: -90.0 }]),
            slot(
                7,
                vec![ReflectHorizontal, ReflectVertical, Scale { sx: 0.5, sy: 1.0 }],
            ),
            slot(
                8,
                vec![
                    Scale { sx: 2.0, sy: 0.5 },
                    Rotate { degrees: -45.0 },
                    ReflectVertical,
                    Translate { dx: -40.0, dy: 45.0 },
                ],
            ),
            slot(
                9,
                vec![
                    Shear { shx: 0.0, shy: 0.25 },
                    Rotate { degrees: -180.0 },
                    Translate { dx: -200.0, dy: 0.0 },
                    ReflectVertical,
                ],
            ),
        ])
    }

    /// Later entries for the same trigger replace earlier ones.
    pub fn from_presets(presets: impl IntoIterator<Item = Preset>) -> Self {
        let mut table = Self::empty();
        for p in presets {
            table.insert(p);
        }
        table
    }

    /// Returns the preset previously bound to the same trigger, if any.
    pub fn insert(&mut self, preset: Preset) -> Option<Preset> {
        self.presets.insert(preset.trigger, preset)
    }

    /// Overlay `overrides` onto this table.
    pub fn merge(mut self, overrides: impl IntoIterator<Item = Preset>) -> Self {
        for p in overrides {
            self.insert(p);
        }
        self
    }

    pub fn get(&self, trigger: Trigger) -> Option<&Preset> {
        self.presets.get(&trigger)
    }

    /// Lookup by raw id; ids outside `1..=9` simply miss.
    pub fn get_id(&self, id: u8) -> Option<&Preset> {
        Trigger::new(id).and_then(|t| self.get(t))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_range() {
        assert!(Trigger::new(0).is_none());
        assert!(Trigger::new(10).is_none());
        assert_eq!(Trigger::new(1).map(Trigger::id), Some(1));
        assert_eq!(Trigger::new(9).map(Trigger::id), Some(9));
        assert_eq!(Trigger::all().count(), 9);
    }

    #[test]
    fn standard_table_covers_all_slots_in_order() {
        let table = PresetTable::standard();
        assert_eq!(table.len(), 9);
        let ids: Vec<u8> = table.iter().map(|p| p.trigger.id()).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn standard_preset_contents() {
        let table = PresetTable::standard();
        assert_eq!(
            table.get_id(5).unwrap().ops,
            vec![
                Op::Translate { dx: 0.0, dy: -444.0 },
                Op::Scale { sx: 2.0, sy: 0.5 }
            ]
        );
        assert_eq!(
            table.get_id(9).unwrap().ops,
            vec![
                Op::Shear { shx: 0.0, shy: 0.25 },
                Op::Rotate { degrees: -180.0 },
                Op::Translate { dx: -200.0, dy: 0.0 },
                Op::ReflectVertical,
            ]
        );
        assert_eq!(
            table.get_id(3).unwrap().ops,
            vec![Op::Scale { sx: 0.5, sy: 1.0 }, Op::ReflectHorizontal]
        );
        assert_eq!(
            table.get_id(4).unwrap().ops,
            vec![Op::Shear { shx: 0.25, shy: 0.0 }]
        );
        assert_eq!(
            table.get_id(6).unwrap().ops,
            vec![Op::Shear { shx: 0.25, shy: 0.0 }, Op::Rotate { degrees: -90.0 }]
        );
        assert_eq!(
            table.get_id(8).unwrap().ops,
            vec![
                Op::Scale { sx: 2.0, sy: 0.5 },
                Op::Rotate { degrees: -45.0 },
                Op::ReflectVertical,
                Op::Translate { dx: -40.0, dy: 45.0 },
            ]
        );
    }

    #[test]
    fn unknown_ids_miss() {
        let table = PresetTable::standard();
        assert!(table.get_id(0).is_none());
        assert!(table.get_id(10).is_none());
        assert!(table.get_id(255).is_none());
    }

    #[test]
    fn merge_replaces_slot() {
        let custom = Preset::new(Trigger::new(2).unwrap(), vec![Op::Rotate { degrees: 90.0 }]);
        let table = PresetTable::standard().merge([custom.clone()]);
        assert_eq!(table.len(), 9);
        assert_eq!(table.get_id(2), Some(&custom));
    }

    #[test]
    fn preset_display() {
        let table = PresetTable::standard();
        assert_eq!(
            table.get_id(5).unwrap().to_string(),
            "#5: translate(0, -444) -> scale(2, 0.5)"
        );
    }
}
