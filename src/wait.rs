//! Wait type detection for Riichi Mahjong hands.
//!
//! The "wait" describes what shape the hand was in before the winning tile
//! completed it. This affects fu calculation and Pinfu eligibility.

use crate::context::WinContext;
use crate::hand::{HandStructure, Meld};
use crate::tile::{Honor, Tile};

/// The type of wait that led to the winning hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitType {
    /// Two-sided sequence wait (e.g., 23 waiting on 1 or 4)
    /// 0 fu
    Ryanmen,

    /// Middle/closed wait (e.g., 13 waiting on 2)
    /// 2 fu
    Kanchan,

    /// Edge wait (e.g., 12 waiting on 3, or 89 waiting on 7)
    /// 2 fu
    Penchan,

    /// Dual triplet wait (e.g., 11+22 as pairs, waiting on either)
    /// 0 fu (but the resulting triplet contributes fu)
    Shanpon,

    /// Single tile / pair wait (e.g., holding one 5m, waiting for another)
    /// 2 fu
    Tanki,

    /// 13-sided kokushi wait (waiting on any of the 13 orphans)
    /// Special yakuman wait
    Kokushi13,
}

impl WaitType {
    /// Fu value contributed by this wait type
    pub fn fu(&self) -> u8 {
        match self {
            WaitType::Ryanmen => 0,
            WaitType::Shanpon => 0,
            WaitType::Kanchan => 2,
            WaitType::Penchan => 2,
            WaitType::Tanki => 2,
            WaitType::Kokushi13 => 0, // Yakuman, fu doesn't matter
        }
    }

    /// Is this a "good" wait (multiple outs)?
    pub fn is_good_wait(&self) -> bool {
        matches!(
            self,
            WaitType::Ryanmen | WaitType::Shanpon | WaitType::Kokushi13
        )
    }
}

/// Detect all possible wait types for a given hand structure and winning tile.
///
/// Returns multiple wait types when the winning tile could have completed
/// the hand in different ways (e.g., a tile that's both in a sequence and
/// could complete a pair).
///
/// # Arguments
/// * `structure` - The completed hand structure
/// * `winning_tile` - The tile that completed the hand
///
/// # Returns
/// A vector of all possible wait types. Empty if the winning tile doesn't
/// appear in the structure (shouldn't happen with valid input).
pub fn detect_wait_types(structure: &HandStructure, winning_tile: Tile) -> Vec<WaitType> {
    match structure {
        HandStructure::Chiitoitsu { pairs } => {
            // Chiitoitsu is always tanki wait
            // (you're always waiting on one tile to complete a pair)
            if pairs.contains(&winning_tile) {
                vec![WaitType::Tanki]
            } else {
                vec![]
            }
        }

        HandStructure::Kokushi { pair } => {
            // Kokushi: tanki on pair tile, or could be 13-wait
            if *pair == winning_tile {
                vec![WaitType::Tanki]
            } else {
                // If not waiting on pair, it's 13-sided wait
                vec![WaitType::Kokushi13]
            }
        }

        HandStructure::Standard { melds, pair } => {
            let mut wait_types = Vec::new();

            // Check if winning tile completed the pair (tanki wait)
            if *pair == winning_tile {
                wait_types.push(WaitType::Tanki);
            }

            // Check each meld
            for meld in melds {
                match meld {
                    Meld::Koutsu(t, _) if *t == winning_tile => {
                        // Triplet contains winning tile → was shanpon wait
                        // (had a pair, waiting for third to make triplet)
                        wait_types.push(WaitType::Shanpon);
                    }

                    Meld::Shuntsu(start_tile, _) => {
                        if let Some(wt) = check_shuntsu_wait(*start_tile, winning_tile) {
                            wait_types.push(wt);
                        }
                    }

                    // Kans don't affect wait type detection (they're already complete)
                    _ => {}
                }
            }

            wait_types
        }
    }
}

/// Check if a winning tile completes a sequence, and if so, what wait type.
///
/// # Arguments
/// * `start_tile` - The lowest tile in the sequence (e.g., 2m for 234m)
/// * `winning_tile` - The tile that completed the hand
///
/// # Returns
/// Some(WaitType) if the winning tile is part of this sequence, None otherwise.
fn check_shuntsu_wait(start_tile: Tile, winning_tile: Tile) -> Option<WaitType> {
    // Sequences only exist for suited tiles
    let (suit, start_val) = match start_tile {
        Tile::Suited { suit, value } => (suit, value),
        Tile::Honor(_) => return None, // Can't happen, but handle gracefully
    };

    let (w_suit, w_val) = match winning_tile {
        Tile::Suited { suit, value } => (suit, value),
        Tile::Honor(_) => return None, // Honor can't be in a sequence
    };

    // Must be same suit
    if suit != w_suit {
        return None;
    }

    // Check if winning tile is in this sequence (start, start+1, start+2)
    if w_val < start_val || w_val > start_val + 2 {
        return None;
    }

    // Determine wait type based on position in sequence
    Some(wait_type_for_shuntsu_position(start_val, w_val))
}

/// Determine wait type for a sequence based on which tile completed it.
///
/// For a sequence starting at value V (tiles: V, V+1, V+2):
/// - If won with V (low): came from V+1,V+2 shape
/// - If won with V+1 (middle): came from V,V+2 shape (kanchan)
/// - If won with V+2 (high): came from V,V+1 shape
fn wait_type_for_shuntsu_position(start_val: u8, winning_val: u8) -> WaitType {
    if winning_val == start_val {
        // Won with low tile of sequence
        // Pre-win shape was (start+1, start+2), e.g., "89" waiting
        if start_val + 2 == 9 {
            // Had 89, only 7 completes it (can't wait on 10) → penchan
            WaitType::Penchan
        } else {
            // e.g., had 45, waiting on 3 or 6 → ryanmen
            WaitType::Ryanmen
        }
    } else if winning_val == start_val + 1 {
        // Won with middle tile → kanchan (always)
        // e.g., had 35, only 4 completes it
        WaitType::Kanchan
    } else {
        // Won with high tile (start + 2)
        // Pre-win shape was (start, start+1), e.g., "12" waiting
        if start_val == 1 {
            // Had 12, only 3 completes it (can't wait on 0) → penchan
            WaitType::Penchan
        } else {
            // e.g., had 34, waiting on 2 or 5 → ryanmen
            WaitType::Ryanmen
        }
    }
}

/// Check if a hand structure qualifies for Pinfu.
///
/// Pinfu requirements:
/// 1. Standard hand (not chiitoitsu)
/// 2. All four melds are sequences (no triplets)
/// 3. Pair is NOT yakuhai (not dragons, not round/seat wind)
/// 4. Wait is ryanmen (two-sided)
/// 5. Hand must be closed (checked via context)
///
/// # Arguments
/// * `structure` - The hand structure to check
/// * `winning_tile` - The tile that completed the hand
/// * `context` - Game context (for wind information and open/closed status)
///
/// # Returns
/// true if all Pinfu conditions are met
pub fn is_pinfu(structure: &HandStructure, winning_tile: Tile, context: &WinContext) -> bool {
    // Must be closed hand
    if context.is_open {
        return false;
    }

    match structure {
        HandStructure::Chiitoitsu { .. } => false,

        HandStructure::Kokushi { .. } => false, // Kokushi can never be pinfu

        HandStructure::Standard { melds, pair } => {
            // 1. All melds must be sequences (no triplets or kans)
            let all_sequences = melds.iter().all(|m| m.is_sequence());
            if !all_sequences {
                return false;
            }

            // 2. Pair must not be yakuhai
            if is_yakuhai_pair(*pair, context) {
                return false;
            }

            // 3. Must have ryanmen wait
            let wait_types = detect_wait_types(structure, winning_tile);
            wait_types.contains(&WaitType::Ryanmen)
        }
    }
}

/// Check if a pair tile would be yakuhai (scoring).
///
/// Dragons are always yakuhai. Winds are yakuhai if they match
/// the round wind or seat wind.
fn is_yakuhai_pair(pair: Tile, context: &WinContext) -> bool {
    match pair {
        Tile::Honor(honor) => {
            match honor {
                // Dragons are always yakuhai
                Honor::White | Honor::Green | Honor::Red => true,
                // Winds are yakuhai if they're value winds
                wind => wind == context.round_wind || wind == context.seat_wind,
            }
        }
        // Suited tiles are never yakuhai
        Tile::Suited { .. } => false,
    }
}

/// Find the best (lowest fu) wait type for a structure.
///
/// Used when calculating fu - we want the interpretation that gives
/// the lowest wait fu (typically ryanmen if available).
pub fn best_wait_type(structure: &HandStructure, winning_tile: Tile) -> Option<WaitType> {
    let wait_types = detect_wait_types(structure, winning_tile);

    // Prefer waits with 0 fu, and among 0-fu waits, prefer Ryanmen (for Pinfu eligibility)
    // Priority order: Ryanmen (0) > Shanpon (1) > Kanchan (2) > Penchan (3) > Tanki (4) > Kokushi13 (5)
    wait_types.into_iter().min_by_key(|wt| {
        let priority = match wt {
            WaitType::Ryanmen => 0,
            WaitType::Shanpon => 1,
            WaitType::Kanchan => 2,
            WaitType::Penchan => 3,
            WaitType::Tanki => 4,
            WaitType::Kokushi13 => 5, // Add this arm to handle the 13-sided wait
        };
        (wt.fu(), priority)
    })
}

/// Find the wait type that maximizes fu for a structure.
///
/// Used by fu calculation: when the winning tile could have completed the
/// hand via more than one wait shape in the same parse (e.g. it both
/// completes a triplet via shanpon and sits in the middle of a sequence),
/// scoring picks whichever interpretation yields the higher fu total. This
/// is the opposite priority from `best_wait_type`, which prefers ryanmen for
/// pinfu eligibility.
pub fn best_wait_type_for_scoring(structure: &HandStructure, winning_tile: Tile) -> Option<WaitType> {
    let wait_types = detect_wait_types(structure, winning_tile);

    // Priority order among equal-fu waits doesn't affect fu, but pick
    // deterministically: Tanki/Kanchan/Penchan (2 fu) > Shanpon/Ryanmen (0 fu).
    wait_types.into_iter().max_by_key(|wt| {
        let priority = match wt {
            WaitType::Tanki => 0,
            WaitType::Kanchan => 1,
            WaitType::Penchan => 2,
            WaitType::Shanpon => 3,
            WaitType::Ryanmen => 4,
            WaitType::Kokushi13 => 5,
        };
        (wt.fu(), std::cmp::Reverse(priority))
    })
}
