use itertools::Itertools;
use serde::Serialize;

/// Number of growth stages a session passes through.
pub const STAGE_COUNT: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum StageName {
    Seed,
    Sprout,
    Leaves,
    Bud,
    Bloom,
}

/// One band of the growth animation. The five bands tile [0, 100] in equal
/// widths; `duration_secs` is informational only.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FlowerStage {
    pub name: StageName,
    pub start_percent: f64,
    pub end_percent: f64,
    pub duration_secs: u32,
}

pub static FLOWER_STAGES: [FlowerStage; STAGE_COUNT as usize] = [
    FlowerStage {
        name: StageName::Seed,
        start_percent: 0.0,
        end_percent: 20.0,
        duration_secs: 5 * 60,
    },
    FlowerStage {
        name: StageName::Sprout,
        start_percent: 20.0,
        end_percent: 40.0,
        duration_secs: 5 * 60,
    },
    FlowerStage {
        name: StageName::Leaves,
        start_percent: 40.0,
        end_percent: 60.0,
        duration_secs: 5 * 60,
    },
    FlowerStage {
        name: StageName::Bud,
        start_percent: 60.0,
        end_percent: 80.0,
        duration_secs: 5 * 60,
    },
    FlowerStage {
        name: StageName::Bloom,
        start_percent: 80.0,
        end_percent: 100.0,
        duration_secs: 5 * 60,
    },
];

/// Fraction of the session already elapsed, in [0, 1]. A zero-length
/// session maps to 0 rather than dividing by zero.
pub fn calculate_progress(time_remaining: u32, total_duration: u32) -> f64 {
    if total_duration == 0 {
        return 0.0;
    }

    let elapsed = total_duration.saturating_sub(time_remaining) as f64;
    (elapsed / total_duration as f64).clamp(0.0, 1.0)
}

/// The stage whose [start, end) band contains the progress fraction.
/// Exactly 100% falls past every band and lands on the terminal stage.
pub fn flower_stage(progress: f64) -> &'static FlowerStage {
    let percent = progress * 100.0;

    FLOWER_STAGES
        .iter()
        .find_or_last(|stage| percent >= stage.start_percent && percent < stage.end_percent)
        .expect("stage table is never empty")
}

/// Position inside the current stage's band, rescaled to [0, 1].
pub fn stage_progress(progress: f64) -> f64 {
    let stage = flower_stage(progress);
    let percent = progress * 100.0;

    let range = stage.end_percent - stage.start_percent;
    ((percent - stage.start_percent) / range).clamp(0.0, 1.0)
}

/// Per-second reveal bookkeeping for the pixel animation. Derived on demand
/// and never cached; identical inputs always produce identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GranularProgress {
    pub overall_progress: f64,
    pub current_stage: &'static FlowerStage,
    pub stage_progress: f64,
    pub total_pixels: u32,
    pub pixels_per_stage: u32,
    pub current_pixel_index: u32,
    pub pixels_in_current_stage: u32,
    pub elapsed_seconds: u32,
    pub should_show_new_pixel: bool,
    /// Seconds between consecutive pixel reveals.
    pub pixel_interval: u32,
}

pub fn granular_progress(time_remaining: u32, total_duration: u32) -> GranularProgress {
    let overall_progress = calculate_progress(time_remaining, total_duration);
    let current_stage = flower_stage(overall_progress);
    let in_stage = stage_progress(overall_progress);

    let elapsed_seconds = total_duration.saturating_sub(time_remaining);

    // One pixel per two seconds across the five stages, but always at least
    // two per stage so even tiny sessions animate.
    let pixels_per_stage = (total_duration / (STAGE_COUNT * 2)).max(2);
    let total_pixels = pixels_per_stage * STAGE_COUNT;

    let current_pixel_index = if total_duration > 0 {
        (u64::from(elapsed_seconds) * u64::from(total_pixels) / u64::from(total_duration)) as u32
    } else {
        0
    };

    // At zero remaining the full stage is revealed no matter how the
    // fractional math rounded on the way down.
    let pixels_in_current_stage = if time_remaining == 0 {
        pixels_per_stage
    } else {
        (in_stage * f64::from(pixels_per_stage)).floor() as u32
    };

    let pixel_interval = (total_duration / total_pixels).max(1);

    GranularProgress {
        overall_progress,
        current_stage,
        stage_progress: in_stage,
        total_pixels,
        pixels_per_stage,
        current_pixel_index,
        pixels_in_current_stage,
        elapsed_seconds,
        should_show_new_pixel: elapsed_seconds > 0 && elapsed_seconds % pixel_interval == 0,
        pixel_interval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn progress_endpoints() {
        assert_eq!(calculate_progress(1500, 1500), 0.0);
        assert_eq!(calculate_progress(0, 1500), 1.0);
        assert_eq!(calculate_progress(750, 1500), 0.5);
    }

    #[test]
    fn progress_is_monotone_in_elapsed_time() {
        let total = 97;
        let mut last = -1.0;

        for remaining in (0..=total).rev() {
            let p = calculate_progress(remaining, total);
            assert!(p >= last, "progress regressed at remaining={remaining}");
            assert!((0.0..=1.0).contains(&p));
            last = p;
        }
    }

    #[test]
    fn zero_total_duration_fails_safe() {
        assert_eq!(calculate_progress(0, 0), 0.0);
        assert_eq!(calculate_progress(42, 0), 0.0);

        let granular = granular_progress(0, 0);
        assert_eq!(granular.current_pixel_index, 0);
        assert_eq!(granular.elapsed_seconds, 0);
        assert!(granular.overall_progress.is_finite());
        assert!(granular.stage_progress.is_finite());
    }

    #[test]
    fn remaining_beyond_total_clamps_to_zero_progress() {
        assert_eq!(calculate_progress(2000, 1500), 0.0);
    }

    #[test]
    fn stage_bands_tile_the_whole_range() {
        let mut expected_start = 0.0;
        for stage in &FLOWER_STAGES {
            assert_eq!(stage.start_percent, expected_start);
            assert!(stage.end_percent > stage.start_percent);
            expected_start = stage.end_percent;
        }
        assert_eq!(expected_start, 100.0);
    }

    #[test]
    fn stage_selection_per_band() {
        assert_matches!(flower_stage(0.0).name, StageName::Seed);
        assert_matches!(flower_stage(0.1).name, StageName::Seed);
        assert_matches!(flower_stage(0.2).name, StageName::Sprout);
        assert_matches!(flower_stage(0.4).name, StageName::Leaves);
        assert_matches!(flower_stage(0.6).name, StageName::Bud);
        assert_matches!(flower_stage(0.8).name, StageName::Bloom);
    }

    #[test]
    fn terminal_stage_is_closed_at_one_hundred_percent() {
        assert_matches!(flower_stage(0.99999).name, StageName::Bloom);
        assert_matches!(flower_stage(1.0).name, StageName::Bloom);
    }

    #[test]
    fn stage_progress_spans_each_band() {
        for stage in &FLOWER_STAGES {
            let start = stage.start_percent / 100.0;
            assert_eq!(stage_progress(start), 0.0, "at start of {}", stage.name);

            let near_end = (stage.end_percent - 0.001) / 100.0;
            assert!(
                stage_progress(near_end) > 0.99,
                "near end of {}",
                stage.name
            );
        }
    }

    #[test]
    fn stage_progress_caps_at_one() {
        assert_eq!(stage_progress(1.0), 1.0);
    }

    #[test]
    fn granular_progress_is_idempotent() {
        let a = granular_progress(321, 1500);
        let b = granular_progress(321, 1500);
        assert_eq!(a, b);
    }

    #[test]
    fn halfway_through_a_ten_second_session() {
        let granular = granular_progress(5, 10);

        assert_eq!(granular.pixels_per_stage, 2);
        assert_eq!(granular.total_pixels, 10);
        assert_eq!(granular.elapsed_seconds, 5);
        assert_eq!(granular.current_pixel_index, 5);
        assert_eq!(granular.pixel_interval, 1);
        assert!(granular.should_show_new_pixel);
    }

    #[test]
    fn pixel_budget_scales_with_duration() {
        // 25 minutes: one pixel per two seconds
        let granular = granular_progress(1500, 1500);
        assert_eq!(granular.pixels_per_stage, 150);
        assert_eq!(granular.total_pixels, 750);
        assert_eq!(granular.pixel_interval, 2);

        // Tiny sessions still get the two-per-stage floor
        let tiny = granular_progress(3, 3);
        assert_eq!(tiny.pixels_per_stage, 2);
        assert_eq!(tiny.total_pixels, 10);
        assert_eq!(tiny.pixel_interval, 1);
    }

    #[test]
    fn pixel_index_is_monotone_and_bounded() {
        let total = 90;
        let mut last = 0;

        for remaining in (0..=total).rev() {
            let granular = granular_progress(remaining, total);
            assert!(granular.current_pixel_index >= last);
            assert!(granular.current_pixel_index <= granular.total_pixels);
            last = granular.current_pixel_index;
        }

        assert_eq!(last, granular_progress(0, total).total_pixels);
    }

    #[test]
    fn finished_session_reveals_the_full_stage() {
        let granular = granular_progress(0, 1500);

        assert_matches!(granular.current_stage.name, StageName::Bloom);
        assert_eq!(granular.pixels_in_current_stage, granular.pixels_per_stage);
        assert_eq!(granular.current_pixel_index, granular.total_pixels);
    }

    #[test]
    fn no_new_pixel_before_the_first_elapsed_second() {
        let granular = granular_progress(10, 10);
        assert_eq!(granular.elapsed_seconds, 0);
        assert!(!granular.should_show_new_pixel);
    }

    #[test]
    fn reveal_cadence_follows_the_interval() {
        // 60s session: 6 pixels per stage, 30 total, one reveal every 2s
        let total = 60;
        for remaining in (0..total).rev() {
            let granular = granular_progress(remaining, total);
            let expected = granular.elapsed_seconds % granular.pixel_interval == 0;
            assert_eq!(granular.should_show_new_pixel, expected);
        }
    }

    #[test]
    fn stage_names_render_lowercase() {
        assert_eq!(StageName::Seed.to_string(), "seed");
        assert_eq!(StageName::Bloom.to_string(), "bloom");
    }
}
