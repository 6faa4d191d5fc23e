//! GEM detector identifiers.
//!
//! Raw id layout (32 bits):
//!
//! ```text
//!  31..28  27..25  24..21  20..16  15..10   9..8    7..5     4..2   1..0
//!  det=2   sub=4   unused  roll    chamber  layer   station  ring   region+1
//! ```

use crate::error::{MuonRecoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const DET_MUON: u32 = 2;
const SUBDET_GEM: u32 = 4;

const DET_START_BIT: u32 = 28;
const SUBDET_START_BIT: u32 = 25;
const REGION_START_BIT: u32 = 0;
const RING_START_BIT: u32 = 2;
const STATION_START_BIT: u32 = 5;
const LAYER_START_BIT: u32 = 8;
const CHAMBER_START_BIT: u32 = 10;
const ROLL_START_BIT: u32 = 16;

const REGION_MASK: u32 = 0x3;
const RING_MASK: u32 = 0x7;
const STATION_MASK: u32 = 0x7;
const LAYER_MASK: u32 = 0x3;
const CHAMBER_MASK: u32 = 0x3F;
const ROLL_MASK: u32 = 0x1F;

pub const MIN_REGION: i8 = -1;
pub const MAX_REGION: i8 = 1;
pub const MIN_RING: u8 = 1;
pub const MAX_RING: u8 = 3;
pub const MIN_STATION: u8 = 1;
pub const MAX_STATION: u8 = 3;
pub const MAX_LAYER: u8 = 2;
pub const MIN_CHAMBER: u8 = 1;
pub const MAX_CHAMBER: u8 = 36;
pub const MAX_ROLL: u8 = 12;

/// Identifier of a GEM super-chamber, chamber or eta partition.
/// Layer 0 denotes a super-chamber, roll 0 a whole chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GemDetId {
    region: i8,
    ring: u8,
    station: u8,
    layer: u8,
    chamber: u8,
    roll: u8,
}

impl GemDetId {
    pub fn new(region: i8, ring: u8, station: u8, layer: u8, chamber: u8, roll: u8) -> Result<Self> {
        check_range("region", i32::from(region), i32::from(MIN_REGION), i32::from(MAX_REGION))?;
        check_range("ring", i32::from(ring), i32::from(MIN_RING), i32::from(MAX_RING))?;
        check_range("station", i32::from(station), i32::from(MIN_STATION), i32::from(MAX_STATION))?;
        check_range("layer", i32::from(layer), 0, i32::from(MAX_LAYER))?;
        check_range("chamber", i32::from(chamber), i32::from(MIN_CHAMBER), i32::from(MAX_CHAMBER))?;
        check_range("roll", i32::from(roll), 0, i32::from(MAX_ROLL))?;

        Ok(Self {
            region,
            ring,
            station,
            layer,
            chamber,
            roll,
        })
    }

    pub fn region(&self) -> i8 {
        self.region
    }

    pub fn ring(&self) -> u8 {
        self.ring
    }

    pub fn station(&self) -> u8 {
        self.station
    }

    pub fn layer(&self) -> u8 {
        self.layer
    }

    pub fn chamber(&self) -> u8 {
        self.chamber
    }

    pub fn roll(&self) -> u8 {
        self.roll
    }

    /// Same detector with a different roll
    pub fn with_roll(&self, roll: u8) -> Result<Self> {
        Self::new(self.region, self.ring, self.station, self.layer, self.chamber, roll)
    }

    /// Chamber containing this id (roll 0)
    pub fn chamber_id(&self) -> Self {
        Self { roll: 0, ..*self }
    }

    /// Super-chamber containing this id (layer 0, roll 0)
    pub fn super_chamber_id(&self) -> Self {
        Self {
            layer: 0,
            roll: 0,
            ..*self
        }
    }

    pub fn raw_id(&self) -> u32 {
        let region = (i32::from(self.region) - i32::from(MIN_REGION)) as u32;
        (DET_MUON << DET_START_BIT)
            | (SUBDET_GEM << SUBDET_START_BIT)
            | ((region & REGION_MASK) << REGION_START_BIT)
            | ((u32::from(self.ring) & RING_MASK) << RING_START_BIT)
            | ((u32::from(self.station) & STATION_MASK) << STATION_START_BIT)
            | ((u32::from(self.layer) & LAYER_MASK) << LAYER_START_BIT)
            | ((u32::from(self.chamber) & CHAMBER_MASK) << CHAMBER_START_BIT)
            | ((u32::from(self.roll) & ROLL_MASK) << ROLL_START_BIT)
    }

    pub fn from_raw(raw: u32) -> Result<Self> {
        let det = raw >> DET_START_BIT;
        let subdet = (raw >> SUBDET_START_BIT) & 0x7;
        if det != DET_MUON || subdet != SUBDET_GEM {
            return Err(MuonRecoError::GeometryLookupMiss(format!(
                "raw id {raw:#010x} is not a GEM detector id"
            )));
        }

        let field = |start: u32, mask: u32| ((raw >> start) & mask) as u8;
        let region = field(REGION_START_BIT, REGION_MASK) as i8 + MIN_REGION;

        Self::new(
            region,
            field(RING_START_BIT, RING_MASK),
            field(STATION_START_BIT, STATION_MASK),
            field(LAYER_START_BIT, LAYER_MASK),
            field(CHAMBER_START_BIT, CHAMBER_MASK),
            field(ROLL_START_BIT, ROLL_MASK),
        )
    }
}

fn check_range(field: &str, value: i32, min: i32, max: i32) -> Result<()> {
    if value < min || value > max {
        return Err(MuonRecoError::GeometryLookupMiss(format!(
            "GEM {field} {value} outside [{min}, {max}]"
        )));
    }
    Ok(())
}

impl fmt::Display for GemDetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GE{}{}/{} L{} C{} R{}",
            if self.region < 0 { "-" } else { "+" },
            self.station,
            self.ring,
            self.layer,
            self.chamber,
            self.roll
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_id_round_trip() {
        let id = GemDetId::new(-1, 1, 1, 2, 36, 8).unwrap();
        assert_eq!(GemDetId::from_raw(id.raw_id()).unwrap(), id);
    }

    #[test]
    fn test_regions_give_distinct_raw_ids() {
        let positive = GemDetId::new(1, 1, 1, 1, 5, 1).unwrap();
        let negative = GemDetId::new(-1, 1, 1, 1, 5, 1).unwrap();
        assert_ne!(positive.raw_id(), negative.raw_id());
    }

    #[test]
    fn test_out_of_range_fields_rejected() {
        assert!(GemDetId::new(2, 1, 1, 1, 1, 1).is_err());
        assert!(GemDetId::new(1, 1, 1, 1, 0, 1).is_err());
        assert!(GemDetId::new(1, 1, 1, 1, 37, 1).is_err());
        assert!(GemDetId::new(1, 1, 1, 3, 1, 1).is_err());
    }

    #[test]
    fn test_foreign_raw_id_rejected() {
        assert!(GemDetId::from_raw(0x1000_0000).is_err());
    }

    #[test]
    fn test_chamber_and_super_chamber_ids() {
        let roll = GemDetId::new(1, 1, 1, 2, 7, 4).unwrap();
        assert_eq!(roll.chamber_id().roll(), 0);
        assert_eq!(roll.chamber_id().layer(), 2);
        assert_eq!(roll.super_chamber_id().layer(), 0);
        assert_eq!(roll.to_string(), "GE+1/1 L2 C7 R4");
    }
}
