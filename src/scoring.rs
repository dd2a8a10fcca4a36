//! Fu (minipoints) calculation and final score/payout computation.
//!
//! In Riichi Mahjong, the final score is determined by:
//! 1. Han (doubles) from yaku
//! 2. Fu (minipoints) from hand composition
//! 3. Whether the winner is dealer or not
//! 4. Whether the win was by tsumo or ron

use serde::{Deserialize, Serialize};

use crate::context::{WinContext, WinType};
use crate::hand::{HandStructure, Meld};
use crate::tile::{Honor, Tile};
use crate::wait::{best_wait_type_for_scoring, is_pinfu};
use crate::yaku::YakuResult;

/// Score limit levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreLevel {
    /// Below mangan - use fu calculation
    Normal,
    /// 5 han (or 3 han 70+ fu, or 4 han 40+ fu)
    Mangan,
    /// 6-7 han
    Haneman,
    /// 8-10 han
    Baiman,
    /// 11-12 han
    Sanbaiman,
    /// 13+ han (or yakuman)
    Yakuman,
    /// Double yakuman (26+ han or 2 yakuman)
    DoubleYakuman,
}

impl ScoreLevel {
    /// Basic points for this score level (before dealer/tsumo multipliers)
    pub fn basic_points(&self) -> u32 {
        match self {
            ScoreLevel::Normal => 0, // Calculated from fu
            ScoreLevel::Mangan => 2000,
            ScoreLevel::Haneman => 3000,
            ScoreLevel::Baiman => 4000,
            ScoreLevel::Sanbaiman => 6000,
            ScoreLevel::Yakuman => 8000,
            ScoreLevel::DoubleYakuman => 16000,
        }
    }

    /// Display name for this level
    pub fn name(&self) -> &'static str {
        match self {
            ScoreLevel::Normal => "",
            ScoreLevel::Mangan => "Mangan",
            ScoreLevel::Haneman => "Haneman",
            ScoreLevel::Baiman => "Baiman",
            ScoreLevel::Sanbaiman => "Sanbaiman",
            ScoreLevel::Yakuman => "Yakuman",
            ScoreLevel::DoubleYakuman => "Double Yakuman",
        }
    }
}

/// Result of fu calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuResult {
    /// Total fu (rounded up to nearest 10, except 25 for chiitoitsu)
    pub total: u8,
    /// Breakdown of fu components for display
    pub breakdown: FuBreakdown,
}

/// Detailed breakdown of fu components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuBreakdown {
    pub base: u8,       // Always 20
    pub menzen_ron: u8, // +10 for closed hand ron
    pub tsumo: u8,      // +2 for tsumo (except pinfu)
    pub melds: u8,      // Fu from triplets/kans
    pub pair: u8,       // Fu from yakuhai pair
    pub wait: u8,       // Fu from wait type
    pub raw_total: u8,  // Sum before rounding
}

/// Payment structure for a winning hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Total points won
    pub total: u32,
    /// If tsumo: what each non-dealer pays (None for ron)
    pub from_non_dealer: Option<u32>,
    /// If tsumo: what dealer pays (None for ron, or if winner is dealer)
    pub from_dealer: Option<u32>,
    /// If ron: what the discarder pays (None for tsumo)
    pub from_discarder: Option<u32>,
}

/// Complete scoring result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    pub fu: FuResult,
    pub han: u8,
    pub score_level: ScoreLevel,
    pub basic_points: u32,
    pub payment: Payment,
    pub is_dealer: bool,
    /// True when yakuman-level score is reached through accumulated han (13+)
    /// rather than through actual yakuman yaku patterns
    pub is_counted_yakuman: bool,
}

// ============================================================================
// Fu Calculation
// ============================================================================

/// Calculate fu for a hand.
///
/// # Arguments
/// * `structure` - The hand structure (decomposition)
/// * `context` - Game context (win type, winds, etc.)
///
/// # Returns
/// FuResult with total fu and breakdown
pub fn calculate_fu(structure: &HandStructure, context: &WinContext) -> FuResult {
    match structure {
        HandStructure::Chiitoitsu { .. } => {
            // Chiitoitsu is always exactly 25 fu (no rounding)
            FuResult {
                total: 25,
                breakdown: FuBreakdown {
                    base: 25,
                    ..Default::default()
                },
            }
        }

        HandStructure::Kokushi { .. } => {
            // Kokushi is yakuman, fu doesn't matter but return 30
            FuResult {
                total: 30,
                breakdown: FuBreakdown {
                    base: 30,
                    ..Default::default()
                },
            }
        }

        HandStructure::Standard { melds, pair } => calculate_standard_fu(melds, *pair, context),
    }
}

/// Calculate fu for a standard hand (4 melds + pair)
fn calculate_standard_fu(melds: &[Meld], pair: Tile, context: &WinContext) -> FuResult {
    let mut breakdown = FuBreakdown {
        base: 20,
        ..Default::default()
    };

    // Check for pinfu + tsumo (special case: exactly 20 fu, no rounding)
    let winning_tile = context.winning_tile;
    let is_pinfu_hand = winning_tile
        .map(|wt| {
            is_pinfu(
                &HandStructure::Standard {
                    melds: melds.to_vec(),
                    pair,
                },
                wt,
                context,
            )
        })
        .unwrap_or(false);

    if is_pinfu_hand && context.win_type == WinType::Tsumo {
        // Pinfu + Tsumo = exactly 20 fu, no additional fu, no rounding
        return FuResult {
            total: 20,
            breakdown: FuBreakdown {
                base: 20,
                ..Default::default()
            },
        };
    }

    // Menzen Ron: +10 fu for closed hand winning by ron
    if !context.is_open && context.win_type == WinType::Ron {
        breakdown.menzen_ron = 10;
    }

    // Tsumo: +2 fu (but NOT for pinfu)
    if context.win_type == WinType::Tsumo && !is_pinfu_hand {
        breakdown.tsumo = 2;
    }

    // Meld fu (accounting for ron-completed triplets)
    // When winning by ron on a TRUE shanpon wait, the triplet completed by the
    // winning tile is treated as "open" for fu purposes, because the final
    // tile came from another player's discard.
    //
    // However, if the winning tile could also complete a sequence (nobetan pattern),
    // then it's NOT a pure shanpon wait, and the triplet remains closed for fu.
    for meld in melds {
        breakdown.melds += meld_fu_with_context(meld, melds, context);
    }

    // Pair fu (yakuhai pairs)
    breakdown.pair = pair_fu(pair, context);

    // Wait fu
    // If Pinfu is awarded, wait must be ryanmen (0 fu) - use that interpretation
    // Otherwise, use the highest fu wait type for maximum scoring
    if let Some(wt) = winning_tile {
        if is_pinfu_hand {
            // Pinfu requires ryanmen, which is 0 fu
            breakdown.wait = 0;
        } else if let Some(wait_type) = best_wait_type_for_scoring(
            &HandStructure::Standard {
                melds: melds.to_vec(),
                pair,
            },
            wt,
        ) {
            breakdown.wait = wait_type.fu();
        }
    }

    // Calculate raw total
    breakdown.raw_total = breakdown.base
        + breakdown.menzen_ron
        + breakdown.tsumo
        + breakdown.melds
        + breakdown.pair
        + breakdown.wait;

    // Round up to nearest 10
    let total = round_up_to_10(breakdown.raw_total);

    // Special case: open hand with no fu beyond base = 30 fu minimum
    // (An open hand with all sequences and no yakuhai pair is still 30 fu)
    let total = if context.is_open && total < 30 {
        30
    } else {
        total
    };

    FuResult { total, breakdown }
}

/// Calculate fu for a single meld, accounting for game context
///
/// When winning by ron on a TRUE shanpon wait, the triplet completed by the
/// winning tile is treated as "open" for fu purposes, because the final
/// tile came from another player's discard.
///
/// However, if the winning tile could also complete a sequence in the hand
/// (nobetan pattern like 11123 waiting on 1 or 4), then it's NOT a pure
/// shanpon wait. In nobetan, the hand has alternative interpretations where
/// the winning tile completes a sequence rather than a triplet, so the
/// triplet should remain "closed" for fu purposes.
///
/// Fu values for triplets (koutsu):
/// - Simple (2-8): 2 open, 4 closed
/// - Terminal/Honor (1,9,honors): 4 open, 8 closed
///
/// Fu values for kans:
/// - Simple (2-8): 8 open, 16 closed
/// - Terminal/Honor (1,9,honors): 16 open, 32 closed
fn meld_fu_with_context(meld: &Meld, all_melds: &[Meld], context: &WinContext) -> u8 {
    match meld {
        Meld::Shuntsu(_, _) => 0, // Sequences give no fu

        Meld::Koutsu(tile, is_meld_open) => {
            let is_terminal_or_honor = tile.is_terminal_or_honor();

            // Base: 2 fu for simple triplet, 4 for terminal/honor triplet
            // Double for closed
            let base = if is_terminal_or_honor { 4 } else { 2 };

            // Check if this triplet was completed by ron
            let is_ron_on_this_tile =
                context.win_type == WinType::Ron && context.winning_tile == Some(*tile);

            // Only treat as "open" if it's a TRUE shanpon wait.
            // If the winning tile also appears in a CLOSED sequence (nobetan pattern),
            // then the triplet remains closed for fu purposes.
            // Open/called sequences don't count - they were already complete before the wait.
            let is_true_shanpon =
                is_ron_on_this_tile && !winning_tile_in_closed_sequence(*tile, all_melds);

            if *is_meld_open || is_true_shanpon {
                base // Open fu
            } else {
                base * 2 // Closed fu
            }
        }

        Meld::Kan(tile, kan_type) => {
            let is_terminal_or_honor = tile.is_terminal_or_honor();

            // Kan fu is 4x the triplet fu
            // Simple: 8 open, 16 closed
            // Terminal/Honor: 16 open, 32 closed
            let base = if is_terminal_or_honor { 16 } else { 8 };

            // Note: Kans cannot be completed by ron (you can't ron a kan),
            // so we only check the kan type
            if kan_type.is_open() {
                base
            } else {
                base * 2
            }
        }
    }
}

/// Check if a tile appears in any CLOSED sequence in the hand.
/// Used to detect nobetan patterns where the winning tile could complete
/// either a triplet or a sequence.
///
/// Only closed sequences count because open/called sequences were already
/// complete before the wait - they don't represent alternative interpretations
/// of the waiting shape.
fn winning_tile_in_closed_sequence(tile: Tile, melds: &[Meld]) -> bool {
    // Honor tiles can never be in sequences
    let (suit, value) = match tile {
        Tile::Suited { suit, value } => (suit, value),
        Tile::Honor(_) => return false,
    };

    for meld in melds {
        // Only check CLOSED sequences (is_open = false)
        if let Meld::Shuntsu(start_tile, is_open) = meld {
            if *is_open {
                continue; // Skip open/called sequences
            }
            if let Tile::Suited {
                suit: seq_suit,
                value: start_val,
            } = start_tile
            {
                // Check if tile is part of this sequence (start, start+1, start+2)
                if *seq_suit == suit && value >= *start_val && value <= start_val + 2 {
                    return true;
                }
            }
        }
    }
    false
}

/// Calculate fu for a single meld (without context, used in tests)
///
/// Fu values for triplets (koutsu):
/// - Simple (2-8): 2 open, 4 closed
/// - Terminal/Honor (1,9,honors): 4 open, 8 closed
///
/// Fu values for kans:
/// - Simple (2-8): 8 open, 16 closed
/// - Terminal/Honor (1,9,honors): 16 open, 32 closed
#[cfg(test)]
fn meld_fu(meld: &Meld) -> u8 {
    match meld {
        Meld::Shuntsu(_, _) => 0, // Sequences give no fu

        Meld::Koutsu(tile, is_meld_open) => {
            let is_terminal_or_honor = tile.is_terminal_or_honor();

            // Base: 2 fu for simple triplet, 4 for terminal/honor triplet
            // Double for closed
            let base = if is_terminal_or_honor { 4 } else { 2 };

            if *is_meld_open {
                base
            } else {
                base * 2
            }
        }

        Meld::Kan(tile, kan_type) => {
            let is_terminal_or_honor = tile.is_terminal_or_honor();

            // Kan fu is 4x the triplet fu
            // Simple: 8 open, 16 closed
            // Terminal/Honor: 16 open, 32 closed
            let base = if is_terminal_or_honor { 16 } else { 8 };

            if kan_type.is_open() {
                base
            } else {
                base * 2
            }
        }
    }
}

/// Calculate fu for the pair
fn pair_fu(pair: Tile, context: &WinContext) -> u8 {
    match pair {
        Tile::Honor(honor) => {
            match honor {
                // Dragons always give 2 fu
                Honor::White | Honor::Green | Honor::Red => 2,

                // Winds give 2 fu if they're value winds
                // Double wind (both round and seat) gives 2 fu (some rules say 4)
                wind => {
                    let mut fu = 0;
                    if wind == context.round_wind {
                        fu += 2;
                    }
                    if wind == context.seat_wind {
                        fu += 2;
                    }
                    fu
                }
            }
        }
        Tile::Suited { .. } => 0, // Suited pairs give no fu
    }
}

/// Round up to the nearest 10
fn round_up_to_10(value: u8) -> u8 {
    ((value + 9) / 10) * 10
}

// ============================================================================
// Score Calculation
// ============================================================================

/// Determine the score level based on han and fu
pub fn determine_score_level(han: u8, fu: u8, is_yakuman: bool) -> ScoreLevel {
    if is_yakuman {
        if han >= 26 {
            ScoreLevel::DoubleYakuman
        } else {
            ScoreLevel::Yakuman
        }
    } else if han >= 13 {
        ScoreLevel::Yakuman // Counted yakuman (kazoe yakuman)
    } else if han >= 11 {
        ScoreLevel::Sanbaiman
    } else if han >= 8 {
        ScoreLevel::Baiman
    } else if han >= 6 {
        ScoreLevel::Haneman
    } else if han >= 5 {
        ScoreLevel::Mangan
    } else if han == 4 && fu >= 40 {
        ScoreLevel::Mangan
    } else if han == 3 && fu >= 70 {
        ScoreLevel::Mangan
    } else {
        ScoreLevel::Normal
    }
}

/// Calculate basic points from han and fu
///
/// Basic formula: fu × 2^(han+2)
/// Capped at 2000 (mangan)
pub fn calculate_basic_points(han: u8, fu: u8, is_yakuman: bool) -> u32 {
    let level = determine_score_level(han, fu, is_yakuman);

    if level != ScoreLevel::Normal {
        return level.basic_points();
    }

    // Normal calculation: fu × 2^(han+2)
    let basic = (fu as u32) * 2u32.pow((han + 2) as u32);

    // Cap at mangan (2000)
    basic.min(2000)
}

/// Calculate final payment based on basic points, dealer status, and win type
pub fn calculate_payment(basic_points: u32, is_dealer: bool, win_type: WinType) -> Payment {
    match win_type {
        WinType::Tsumo => {
            if is_dealer {
                // Dealer tsumo: each non-dealer pays basic × 2
                let from_each = round_up_to_100(basic_points * 2);
                Payment {
                    total: from_each * 3,
                    from_non_dealer: Some(from_each),
                    from_dealer: None, // Dealer is the winner
                    from_discarder: None,
                }
            } else {
                // Non-dealer tsumo: dealer pays basic × 2, others pay basic × 1
                let from_dealer = round_up_to_100(basic_points * 2);
                let from_non_dealer = round_up_to_100(basic_points);
                Payment {
                    total: from_dealer + (from_non_dealer * 2),
                    from_non_dealer: Some(from_non_dealer),
                    from_dealer: Some(from_dealer),
                    from_discarder: None,
                }
            }
        }
        WinType::Ron => {
            // Ron: discarder pays everything
            let multiplier = if is_dealer { 6 } else { 4 };
            let from_discarder = round_up_to_100(basic_points * multiplier);
            Payment {
                total: from_discarder,
                from_non_dealer: None,
                from_dealer: None,
                from_discarder: Some(from_discarder),
            }
        }
    }
}

/// Round up to the nearest 100
fn round_up_to_100(value: u32) -> u32 {
    ((value + 99) / 100) * 100
}

// ============================================================================
// Complete Scoring
// ============================================================================

/// Calculate complete score for a hand
///
/// # Arguments
/// * `structure` - Hand decomposition
/// * `yaku_result` - Result from yaku detection (includes han and dora)
/// * `context` - Game context
///
/// # Returns
/// Complete scoring result with fu, han, level, and payment
pub fn calculate_score(
    structure: &HandStructure,
    yaku_result: &YakuResult,
    context: &WinContext,
) -> ScoringResult {
    // Calculate fu
    let fu = calculate_fu(structure, context);

    // Get total han (yaku + dora)
    let han = yaku_result.total_han_with_dora();

    // Determine score level
    let score_level = determine_score_level(han, fu.total, yaku_result.is_yakuman);

    // Calculate basic points
    let basic_points = calculate_basic_points(han, fu.total, yaku_result.is_yakuman);

    // Calculate payment
    let is_dealer = context.is_dealer();
    let payment = calculate_payment(basic_points, is_dealer, context.win_type);

    // Counted yakuman: reached yakuman level (13+ han) without actual yakuman yaku
    let is_counted_yakuman = (score_level == ScoreLevel::Yakuman
        || score_level == ScoreLevel::DoubleYakuman)
        && !yaku_result.is_yakuman;

    ScoringResult {
        fu,
        han,
        score_level,
        basic_points,
        payment,
        is_dealer,
        is_counted_yakuman,
    }
}

/// Format a scoring result for display
pub fn format_score(result: &ScoringResult, yaku_result: &YakuResult) -> String {
    let mut output = String::new();

    // Yaku list
    output.push_str("Yaku:\n");
    for yaku in &yaku_result.yaku_list {
        let han = yaku.han();
        output.push_str(&format!("  • {:?} ({} han)\n", yaku, han));
    }

    // Dora breakdown
    if yaku_result.regular_dora > 0 {
        output.push_str(&format!("  • Dora ({} han)\n", yaku_result.regular_dora));
    }
    if yaku_result.ura_dora > 0 {
        output.push_str(&format!("  • Ura Dora ({} han)\n", yaku_result.ura_dora));
    }
    if yaku_result.aka_dora > 0 {
        output.push_str(&format!(
            "  • Red Fives (Akadora) ({} han)\n",
            yaku_result.aka_dora
        ));
    }

    // Han and Fu
    output.push_str(&format!("\n{} han / {} fu\n", result.han, result.fu.total));

    // Score level (if applicable)
    if result.score_level != ScoreLevel::Normal {
        output.push_str(&format!("{}\n", result.score_level.name()));
    }

    // Payment
    output.push_str(&format!("\nTotal: {} points\n", result.payment.total));

    if let Some(from_discarder) = result.payment.from_discarder {
        output.push_str(&format!("Ron: {} from discarder\n", from_discarder));
    } else {
        if result.is_dealer {
            if let Some(from_each) = result.payment.from_non_dealer {
                output.push_str(&format!("Tsumo: {} all\n", from_each));
            }
        } else {
            if let (Some(from_dealer), Some(from_non_dealer)) =
                (result.payment.from_dealer, result.payment.from_non_dealer)
            {
                output.push_str(&format!("Tsumo: {}/{}\n", from_dealer, from_non_dealer));
            }
        }
    }

    output
}

// ============================================================================
// Tests
// ============================================================================
