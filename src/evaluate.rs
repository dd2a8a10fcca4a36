//! The public evaluation façade: the single entry point the rest of this
//! crate's modules (decomposition, yaku detection, fu/score calculation)
//! exist to serve.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::context::WinContext;
use crate::error::{EvaluationError, InvalidInputReason};
use crate::hand::{Meld, decompose_hand, decompose_hand_with_melds};
use crate::parse::counts_from_kinds;
use crate::scoring::{Payment, ScoreLevel, calculate_score};
use crate::tile::Tile;
use crate::yaku::detect_yaku_with_context;

/// Score tier, labeled the way a scoreboard would read it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Normal,
    Mangan,
    Haneman,
    Baiman,
    Sanbaiman,
    /// Yakuman, with the stack count (1 = single, 2 = double yakuman).
    Yakuman(u8),
}

impl Tier {
    fn from_level(level: ScoreLevel, han: u8) -> Tier {
        match level {
            ScoreLevel::Normal => Tier::Normal,
            ScoreLevel::Mangan => Tier::Mangan,
            ScoreLevel::Haneman => Tier::Haneman,
            ScoreLevel::Baiman => Tier::Baiman,
            ScoreLevel::Sanbaiman => Tier::Sanbaiman,
            ScoreLevel::Yakuman => Tier::Yakuman((han / 13).max(1)),
            ScoreLevel::DoubleYakuman => Tier::Yakuman((han / 13).max(2)),
        }
    }

    /// Stable ASCII label for display, matching the façade's tier-label contract.
    pub fn label(&self) -> String {
        match self {
            Tier::Normal => "normal".to_string(),
            Tier::Mangan => "mangan".to_string(),
            Tier::Haneman => "haneman".to_string(),
            Tier::Baiman => "baiman".to_string(),
            Tier::Sanbaiman => "sanbaiman".to_string(),
            Tier::Yakuman(1) => "yakuman".to_string(),
            Tier::Yakuman(n) => format!("yakuman x{n}"),
        }
    }
}

/// The result of a successful [`evaluate`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub han: u32,
    pub fu: u32,
    /// Stable ASCII yaku identifiers ([`crate::yaku::Yaku::stable_name`]).
    pub yaku: Vec<String>,
    pub tier: Tier,
    pub payment: Payment,
}

fn meld_tile_count(meld: &Meld) -> usize {
    match meld {
        Meld::Kan(_, _) => 4,
        Meld::Shuntsu(_, _) | Meld::Koutsu(_, _) => 3,
    }
}

fn meld_tiles(meld: &Meld) -> Vec<Tile> {
    match meld {
        Meld::Shuntsu(start, _) => {
            let suit = start.suit().expect("sequences are always suited");
            let value = start.value().expect("sequences are always suited");
            (0..3)
                .map(|offset| Tile::suited(suit, value + offset))
                .collect()
        }
        Meld::Koutsu(tile, _) => vec![*tile; 3],
        Meld::Kan(tile, _) => vec![*tile; 4],
    }
}

fn validate_input(
    closed_multiset: &[u8; 34],
    open_melds: &[Meld],
    winning_tile_kind: u8,
) -> Result<(), InvalidInputReason> {
    if winning_tile_kind > 33 {
        return Err(InvalidInputReason::TileKindOutOfRange(winning_tile_kind));
    }

    for (kind, &count) in closed_multiset.iter().enumerate() {
        if count > 4 {
            return Err(InvalidInputReason::TileCountExceedsFour {
                kind: kind as u8,
                count,
            });
        }
    }

    if closed_multiset[winning_tile_kind as usize] == 0 {
        return Err(InvalidInputReason::WinningTileAbsent(winning_tile_kind));
    }

    // A closed kan (ankan) is a raw 4-count within `closed_multiset` — the
    // decomposer resolves it there directly, no pre-declaration needed.
    // Called kans (open or added) are declared as `Meld::Kan` entries in
    // `open_melds` instead. Either way each kan contributes one tile beyond
    // the usual 3-tiles-per-meld count, so the expected total grows by one
    // per kan present.
    let closed_total: usize = closed_multiset.iter().map(|&c| c as usize).sum();
    let open_total: usize = open_melds.iter().map(|m| meld_tile_count(m)).sum();
    let closed_kan_count = closed_multiset.iter().filter(|&&c| c == 4).count();
    let open_kan_count = open_melds
        .iter()
        .filter(|m| matches!(m, Meld::Kan(_, _)))
        .count();
    let kan_count = closed_kan_count + open_kan_count;

    let total = closed_total + open_total;
    let expected = 14 + kan_count;
    if total != expected {
        return Err(InvalidInputReason::WrongTileCount { actual: total });
    }

    Ok(())
}

/// Evaluate a completed hand and return its verdict.
///
/// `closed_multiset` is indexed by tile kind (`0..=33`) and must include the
/// winning tile; a concealed kan (ankan) is represented there as a raw
/// 4-count. `open_melds` lists melds called from other players — pons, chis,
/// and called kans (open or added) — whose tiles are not part of
/// `closed_multiset`.
pub fn evaluate(
    closed_multiset: [u8; 34],
    open_melds: &[Meld],
    winning_tile_kind: u8,
    ctx: &WinContext,
) -> Result<Verdict, EvaluationError> {
    validate_input(&closed_multiset, open_melds, winning_tile_kind)?;

    let winning_tile =
        Tile::from_kind(winning_tile_kind).expect("validated to be 0..=33 above");

    let mut context = ctx.clone();
    context.winning_tile = Some(winning_tile);
    // A declared closed kan still lives in `open_melds` (it must be passed
    // as a fixed group for decomposition) but does not break menzen status;
    // only a genuinely called meld (pon/chi/open kan) marks the hand open.
    context.is_open = context.is_open || open_melds.iter().any(|m| m.is_open());

    let hand_counts = counts_from_kinds(&closed_multiset);

    let mut all_counts = hand_counts.clone();
    for meld in open_melds {
        for tile in meld_tiles(meld) {
            *all_counts.entry(tile).or_insert(0) += 1;
        }
    }

    let structures = if open_melds.is_empty() {
        decompose_hand(&hand_counts)
    } else {
        decompose_hand_with_melds(&hand_counts, open_melds)
    };

    if structures.is_empty() {
        return Err(EvaluationError::NotWinning);
    }

    let mut candidates: Vec<_> = structures
        .into_iter()
        .map(|structure| {
            let yaku_result = detect_yaku_with_context(&structure, &all_counts, &context);
            let score = calculate_score(&structure, &yaku_result, &context);
            (yaku_result, score)
        })
        .filter(|(yaku_result, _)| !yaku_result.yaku_list.is_empty())
        .collect();

    if candidates.is_empty() {
        return Err(EvaluationError::NoYaku);
    }

    // Parse selection: maximize han after exclusions, tie-break on higher fu.
    candidates.sort_by(|a, b| {
        b.1.han
            .cmp(&a.1.han)
            .then_with(|| b.1.fu.total.cmp(&a.1.fu.total))
    });

    let (yaku_result, score) = candidates.into_iter().next().expect("checked non-empty above");

    let tier = Tier::from_level(score.score_level, score.han);
    debug!(
        "evaluate: han={} fu={} tier={}",
        score.han,
        score.fu.total,
        tier.label()
    );

    Ok(Verdict {
        han: score.han as u32,
        fu: score.fu.total as u32,
        yaku: yaku_result
            .yaku_list
            .iter()
            .map(|y| y.stable_name().to_string())
            .collect(),
        tier,
        payment: score.payment,
    })
}
