use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;

use crate::growth::GranularProgress;

static THEME_DIR: Dir = include_dir!("src/themes");

/// What a single cell of the scene is made of; drives its color.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PixelKind {
    Soil,
    Stem,
    Leaf,
    Petal,
    CenterBright,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemePixel {
    #[serde(rename = "type")]
    pub kind: PixelKind,
    /// Row 0 is the ground; rows grow upward.
    pub row: u16,
    pub col: u16,
}

/// A pixel-art scene revealed front to back as a work session advances.
/// Soil is always visible; everything after it grows in.
#[derive(Deserialize, Clone, Debug)]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(rename = "gridSize")]
    pub grid_size: GridSize,
    pub pixels: Vec<ThemePixel>,
}

impl Theme {
    /// Every embedded theme, in stable id order.
    pub fn all() -> Vec<Theme> {
        THEME_DIR
            .files()
            .filter_map(|file| file.contents_utf8())
            .map(|contents| from_str(contents).expect("unable to deserialize theme json"))
            .sorted_by(|a: &Theme, b: &Theme| a.id.cmp(&b.id))
            .collect()
    }

    pub fn by_id(id: &str) -> Option<Theme> {
        Theme::all().into_iter().find(|theme| theme.id == id)
    }

    pub fn random() -> Theme {
        Theme::all()
            .choose(&mut rand::thread_rng())
            .cloned()
            .expect("at least one embedded theme")
    }

    /// Cycle order for the theme key: the theme after `id`, wrapping.
    pub fn after(id: &str) -> Theme {
        let all = Theme::all();
        let idx = all.iter().position(|theme| theme.id == id);
        let next = match idx {
            Some(i) => (i + 1) % all.len(),
            None => 0,
        };
        all[next].clone()
    }

    pub fn ground_pixels(&self) -> impl Iterator<Item = &ThemePixel> {
        self.pixels
            .iter()
            .filter(|pixel| pixel.kind == PixelKind::Soil)
    }

    /// The pixels that appear progressively, in reveal order.
    pub fn growth_pixels(&self) -> impl Iterator<Item = &ThemePixel> {
        self.pixels
            .iter()
            .filter(|pixel| pixel.kind != PixelKind::Soil)
    }

    /// How many growth pixels the current reveal state uncovers. The timer's
    /// pixel budget is rescaled onto this theme's own pixel count.
    pub fn revealed_count(&self, granular: &GranularProgress) -> usize {
        let growth_len = self.growth_pixels().count();
        if granular.total_pixels == 0 {
            return 0;
        }

        (granular.current_pixel_index as usize * growth_len) / granular.total_pixels as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::granular_progress;

    #[test]
    fn embedded_themes_deserialize() {
        let themes = Theme::all();
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].id, "classic-flower");
        assert_eq!(themes[1].id, "pixel-tree");
    }

    #[test]
    fn every_pixel_sits_inside_its_grid() {
        for theme in Theme::all() {
            for pixel in &theme.pixels {
                assert!(
                    pixel.row < theme.grid_size.height,
                    "{}: row {} out of bounds",
                    theme.id,
                    pixel.row
                );
                assert!(
                    pixel.col < theme.grid_size.width,
                    "{}: col {} out of bounds",
                    theme.id,
                    pixel.col
                );
            }
        }
    }

    #[test]
    fn ground_is_a_full_soil_row() {
        for theme in Theme::all() {
            let ground: Vec<_> = theme.ground_pixels().collect();
            assert_eq!(ground.len(), theme.grid_size.width as usize);
            assert!(ground.iter().all(|pixel| pixel.row == 0));
        }
    }

    #[test]
    fn lookup_by_id() {
        let theme = Theme::by_id("classic-flower").unwrap();
        assert_eq!(theme.name, "Classic Flower");

        assert!(Theme::by_id("no-such-theme").is_none());
    }

    #[test]
    fn random_picks_an_embedded_theme() {
        let ids: Vec<String> = Theme::all().into_iter().map(|theme| theme.id).collect();
        for _ in 0..10 {
            assert!(ids.contains(&Theme::random().id));
        }
    }

    #[test]
    fn after_cycles_through_all_themes_and_wraps() {
        let all = Theme::all();
        let mut id = all[0].id.clone();
        let mut seen = Vec::new();

        for _ in 0..all.len() {
            let next = Theme::after(&id);
            seen.push(next.id.clone());
            id = next.id;
        }

        assert_eq!(id, all[0].id, "cycling should wrap to the start");
        assert_eq!(seen.len(), all.len());
    }

    #[test]
    fn after_unknown_id_starts_from_the_first_theme() {
        assert_eq!(Theme::after("no-such-theme").id, Theme::all()[0].id);
    }

    #[test]
    fn reveal_count_tracks_the_session() {
        let theme = Theme::by_id("classic-flower").unwrap();
        let growth_len = theme.growth_pixels().count();

        assert_eq!(theme.revealed_count(&granular_progress(60, 60)), 0);
        assert_eq!(theme.revealed_count(&granular_progress(0, 60)), growth_len);

        let halfway = theme.revealed_count(&granular_progress(30, 60));
        assert_eq!(halfway, growth_len / 2);
    }

    #[test]
    fn reveal_count_is_monotone() {
        let theme = Theme::by_id("pixel-tree").unwrap();
        let total = 120;
        let mut last = 0;

        for remaining in (0..=total).rev() {
            let revealed = theme.revealed_count(&granular_progress(remaining, total));
            assert!(revealed >= last);
            last = revealed;
        }
    }
}
