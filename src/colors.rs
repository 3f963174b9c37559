use crate::table::category_class;

const SATURATIONS: [f64; 3] = [65.0, 75.0, 85.0];
const BACKGROUND_LIGHTNESS: [f64; 2] = [92.0, 88.0];
const TEXT_LIGHTNESS: [f64; 3] = [25.0, 30.0, 35.0];
const TEXT_SATURATION_BOOST: f64 = 15.0;

pub const STYLE_ELEMENT_ID: &str = "category-colors";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryColor {
    pub category: String,
    pub hue: f64,
    pub background: String,
    pub text: String,
}

/// Spreads the distinct categories evenly around the hue wheel, pastel
/// background and dark text, in the order given.
pub fn assign_colors<S: AsRef<str>>(categories: &[S]) -> Vec<CategoryColor> {
    let mut distinct: Vec<&str> = Vec::new();
    for category in categories {
        if !distinct.contains(&category.as_ref()) {
            distinct.push(category.as_ref());
        }
    }

    let count = distinct.len() as f64;
    distinct
        .into_iter()
        .enumerate()
        .map(|(idx, category)| {
            let hue = idx as f64 * 360.0 / count;
            let saturation = SATURATIONS[idx % 3];
            let background_lightness = BACKGROUND_LIGHTNESS[idx % 2];
            let text_saturation = (saturation + TEXT_SATURATION_BOOST).min(100.0);
            let text_lightness = TEXT_LIGHTNESS[idx % 3];
            CategoryColor {
                category: category.to_string(),
                hue,
                background: hsl(hue, saturation, background_lightness),
                text: hsl(hue, text_saturation, text_lightness),
            }
        })
        .collect()
}

/// The single `<style>` element carrying every category rule. Rendering it
/// again yields a replacement, never an additional block.
pub fn style_block(colors: &[CategoryColor]) -> String {
    let rules: String = colors
        .iter()
        .map(|color| {
            let class = category_class(&color.category);
            format!(
                ".{class} td, td.{class} {{ background-color: {}; color: {}; }}\n",
                color.background, color.text
            )
        })
        .collect();
    format!("<style id=\"{STYLE_ELEMENT_ID}\">\n{rules}</style>")
}

fn hsl(hue: f64, saturation: f64, lightness: f64) -> String {
    format!("hsl({:.1}, {saturation}%, {lightness}%)", hue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_for<'a>(colors: &'a [CategoryColor], category: &str) -> Option<&'a CategoryColor> {
        colors.iter().find(|color| color.category == category)
    }

    #[test]
    fn hues_are_evenly_spaced() {
        let colors = assign_colors(&["Sport", "Bénévolat", "Art", "Projets"]);
        let hues: Vec<f64> = colors.iter().map(|c| c.hue).collect();
        assert_eq!(hues, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn deterministic_and_distinct_up_to_twelve() {
        let categories: Vec<String> = (0..12).map(|i| format!("cat {i}")).collect();
        let first = assign_colors(&categories);
        let second = assign_colors(&categories);
        assert_eq!(first, second);

        let mut buckets: Vec<i64> = first.iter().map(|c| c.hue.round() as i64).collect();
        buckets.sort_unstable();
        buckets.dedup();
        assert_eq!(buckets.len(), 12);
    }

    #[test]
    fn palette_cycles_by_index() {
        let colors = assign_colors(&["a", "b", "c", "d"]);
        assert_eq!(colors[0].background, "hsl(0.0, 65%, 92%)");
        assert_eq!(colors[0].text, "hsl(0.0, 80%, 25%)");
        assert_eq!(colors[1].background, "hsl(90.0, 75%, 88%)");
        assert_eq!(colors[2].text, "hsl(180.0, 100%, 35%)");
        assert_eq!(colors[3].background, "hsl(270.0, 65%, 88%)");
    }

    #[test]
    fn duplicates_collapse_to_first_position() {
        let colors = assign_colors(&["Sport", "Art", "Sport"]);
        assert_eq!(colors.len(), 2);
        assert_eq!(color_for(&colors, "Art").map(|c| c.hue), Some(180.0));
    }

    #[test]
    fn order_change_changes_assignment() {
        let forward = assign_colors(&["Sport", "Art"]);
        let backward = assign_colors(&["Art", "Sport"]);
        assert_ne!(
            color_for(&forward, "Sport").map(|c| c.hue),
            color_for(&backward, "Sport").map(|c| c.hue)
        );
    }

    #[test]
    fn single_style_block() {
        let colors = assign_colors(&["Bénévolat"]);
        let block = style_block(&colors);
        assert_eq!(block.matches("<style").count(), 1);
        assert!(block.starts_with("<style id=\"category-colors\">"));
        assert!(block.contains(".cat-benevolat td, td.cat-benevolat"));
        assert!(style_block(&[]).contains("category-colors"));
    }
}
