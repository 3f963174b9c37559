use crate::models::{ActivityRecord, CategoryGroup, HoursValue, Totals};
use crate::slug::slugify;
use tracing::warn;

/// Header labels of the summary table, in column order.
#[derive(Debug, Clone)]
pub struct ColumnLabels {
    pub category: String,
    pub name: String,
    pub hours_performed: String,
    pub hours_valued: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            category: "Catégorie".to_string(),
            name: "Activité".to_string(),
            hours_performed: "Heures prestées".to_string(),
            hours_valued: "Heures valorisées".to_string(),
        }
    }
}

/// Leading cell of a category block, spanning every row of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCell {
    pub label: String,
    pub rowspan: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<'a> {
    pub record: &'a ActivityRecord,
    pub slug: String,
    pub category_class: String,
    pub category_cell: Option<CategoryCell>,
}

/// Stable partition by `categorie`, in first-seen order.
pub fn group_by_category(records: &[ActivityRecord]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for record in records {
        match groups
            .iter_mut()
            .find(|group| group.categorie == record.categorie)
        {
            Some(group) => group.rows.push(record.clone()),
            None => groups.push(CategoryGroup {
                categorie: record.categorie.clone(),
                rows: vec![record.clone()],
            }),
        }
    }
    groups
}

pub fn category_class(categorie: &str) -> String {
    format!("cat-{}", slugify(categorie))
}

/// Flattens groups into rows; only the first row of each group carries the category cell.
pub fn grouped_rows(groups: &[CategoryGroup]) -> Vec<TableRow<'_>> {
    groups
        .iter()
        .flat_map(|group| {
            let class = category_class(&group.categorie);
            group.rows.iter().enumerate().map(move |(idx, record)| TableRow {
                record,
                slug: slugify(&record.nom),
                category_class: class.clone(),
                category_cell: (idx == 0).then(|| CategoryCell {
                    label: group.categorie.clone(),
                    rowspan: group.rows.len(),
                }),
            })
        })
        .collect()
}

/// Lenient hour parsing: keeps digits, `.` and `,`, treats the first comma as
/// a decimal point and reads the longest numeric prefix. Anything else is 0.
pub fn parse_hours(value: Option<&HoursValue>) -> f64 {
    let raw = match value {
        None => return 0.0,
        Some(HoursValue::Number(number)) => number.to_string(),
        Some(HoursValue::Text(text)) => text.clone(),
    };

    let cleaned: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == ',')
        .collect();
    let normalized = cleaned.replacen(',', ".", 1);
    leading_number(&normalized).unwrap_or(0.0)
}

fn leading_number(input: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in input.char_indices() {
        match ch {
            '0'..='9' => end = idx + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = idx + 1;
            }
            _ => break,
        }
    }
    input[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn calculate_totals(records: &[ActivityRecord]) -> Totals {
    records.iter().fold(Totals::default(), |mut totals, record| {
        totals.total_prestees += parse_hours(record.heures_prestees.as_ref());
        totals.total_valorisees += parse_hours(record.heures_valorisees.as_ref());
        totals
    })
}

/// First record whose slugified name equals `slug`. Duplicates are logged.
pub fn find_by_slug<'a>(records: &'a [ActivityRecord], slug: &str) -> Option<&'a ActivityRecord> {
    let mut matches = records.iter().filter(|record| slugify(&record.nom) == slug);
    let first = matches.next()?;
    let extra = matches.count();
    if extra > 0 {
        warn!(slug, duplicates = extra, "several activities share this slug, using the first");
    }
    Some(first)
}
