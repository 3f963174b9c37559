use crate::colors::{assign_colors, style_block};
use crate::models::{ActivityRecord, CategoryGroup, HoursValue, ProofRef, Totals, VeloHours};
use crate::proof::{classify, ProofKind};
use crate::stats::{format_distance, format_duration, format_elevation, format_time};
use crate::table::{calculate_totals, group_by_category, grouped_rows, ColumnLabels, TableRow};

const INSTAGRAM_EMBED_SRC: &str = "//www.instagram.com/embed.js";
const STRAVA_BADGE_SRC: &str = "//badges.strava.com/echelon-sprite-48.png";

pub fn render_summary_page(
    records: &[ActivityRecord],
    velo: Option<&VeloHours>,
    labels: &ColumnLabels,
) -> String {
    let groups = group_by_category(records);
    let totals = calculate_totals(records);
    let categories: Vec<&str> = groups.iter().map(|g| g.categorie.as_str()).collect();
    let colors = assign_colors(&categories);

    let body = format!(
        r#"<main class="app">
    <header>
      <h1>Portfolio</h1>
      <p class="subtitle">Activités, heures prestées et heures valorisées par catégorie.</p>
    </header>
    <table id="table">
      <thead>
        <tr><th>{cat}</th><th>{name}</th><th>{performed}</th><th>{valued}</th></tr>
      </thead>
      <tbody>
{rows}
      </tbody>
    </table>
{ride_panel}
  </main>"#,
        cat = html_escape(&labels.category),
        name = html_escape(&labels.name),
        performed = html_escape(&labels.hours_performed),
        valued = html_escape(&labels.hours_valued),
        rows = render_table_body(&groups, &totals, labels),
        ride_panel = velo.map(render_ride_panel).unwrap_or_default(),
    );

    render_page("Portfolio", &style_block(&colors), &body)
}

/// Grouped rows followed by the totals row.
pub fn render_table_body(groups: &[CategoryGroup], totals: &Totals, labels: &ColumnLabels) -> String {
    build_grouped_table(groups, labels) + &build_total_row(labels, totals)
}

pub fn build_grouped_table(groups: &[CategoryGroup], labels: &ColumnLabels) -> String {
    grouped_rows(groups)
        .iter()
        .map(|row| render_row(row, labels))
        .collect()
}

fn render_row(row: &TableRow<'_>, labels: &ColumnLabels) -> String {
    let record = row.record;
    let category_cell = row
        .category_cell
        .as_ref()
        .map(|cell| {
            format!(
                r#"<td class="category-label {class}" data-label="{label}" rowspan="{span}">{text}</td>"#,
                class = row.category_class,
                label = html_escape(&labels.category),
                span = cell.rowspan,
                text = html_escape(&capitalize_first_letter(&cell.label)),
            )
        })
        .unwrap_or_default();

    format!(
        r#"<tr class="{class}">{category_cell}<td data-label="{name_label}"><a href="/activite?activity={slug}" class="activity-link">{name}</a></td><td data-label="{performed_label}">{performed}</td><td data-label="{valued_label}">{valued}</td></tr>
"#,
        class = row.category_class,
        name_label = html_escape(&labels.name),
        slug = row.slug,
        name = html_escape(&capitalize_first_letter(&record.nom)),
        performed_label = html_escape(&labels.hours_performed),
        performed = display_hours(record.heures_prestees.as_ref()),
        valued_label = html_escape(&labels.hours_valued),
        valued = display_hours(record.heures_valorisees.as_ref()),
    )
}

pub fn build_total_row(labels: &ColumnLabels, totals: &Totals) -> String {
    format!(
        r#"<tr class="total-row"><td class="category-label total-label" data-label="">Total</td><td></td><td data-label="{performed_label}">~{performed}h</td><td data-label="{valued_label}">{valued}h</td></tr>
"#,
        performed_label = html_escape(&labels.hours_performed),
        performed = totals.total_prestees,
        valued_label = html_escape(&labels.hours_valued),
        valued = totals.total_valorisees,
    )
}

fn render_ride_panel(velo: &VeloHours) -> String {
    let stats = &velo.stats;
    let recent: String = velo
        .recent
        .iter()
        .map(|ride| {
            format!(
                r#"<div class="activity-card"><div class="activity-header"><h4>{name}</h4><span class="activity-type">{kind}</span></div><div class="activity-stats"><span>{distance} km</span><span>{duration}</span><span>{elevation} m</span></div><div class="activity-date">{date}</div></div>
"#,
                name = html_escape(&ride.name),
                kind = html_escape(&ride.kind),
                distance = format_distance(ride.distance.unwrap_or_default()),
                duration = format_duration(ride.moving_time.unwrap_or_default()),
                elevation = format_elevation(ride.total_elevation_gain.unwrap_or_default()),
                date = html_escape(ride_date(ride.start_date.as_deref())),
            )
        })
        .collect();

    format!(
        r#"    <section class="strava-stats">
      <h3>Statistiques Cyclisme</h3>
      <div class="stats-grid">
        <div class="stat-item"><span class="stat-label">Distance</span><span class="stat-value">{distance} km</span></div>
        <div class="stat-item"><span class="stat-label">Temps</span><span class="stat-value">{time} h</span></div>
        <div class="stat-item"><span class="stat-label">Dénivelé</span><span class="stat-value">{elevation} m</span></div>
        <div class="stat-item"><span class="stat-label">Sorties</span><span class="stat-value">{count}</span></div>
      </div>
      <div class="activities-grid">
{recent}      </div>
    </section>"#,
        distance = format_distance(stats.distance),
        time = format_time(stats.moving_time),
        elevation = format_elevation(stats.elevation_gain),
        count = stats.count,
    )
}

fn ride_date(start_date: Option<&str>) -> &str {
    start_date
        .and_then(|raw| raw.get(..10))
        .unwrap_or_default()
}

/// The detail region for one activity.
pub fn render_detail(activity: &ActivityRecord, asset_base: &str) -> String {
    let proofs: String = activity
        .preuves
        .iter()
        .map(|proof| render_proof(proof, asset_base))
        .collect();
    let proofs = if proofs.is_empty() {
        "<p>Aucune preuve disponible</p>".to_string()
    } else {
        proofs
    };

    let date = activity
        .date
        .as_deref()
        .map(|date| format!(r#"<p class="date">Date: {}</p>"#, html_escape(date)))
        .unwrap_or_default();
    let performed = activity
        .heures_prestees
        .as_ref()
        .filter(|hours| !matches!(hours, HoursValue::Number(n) if *n == 0.0))
        .map(|hours| html_escape(&hours.to_string()))
        .filter(|hours| !hours.is_empty())
        .unwrap_or_else(|| "Non spécifié".to_string());

    format!(
        r#"<div class="activity-detail">
      <h1>{name}</h1>
      <p class="category">Catégorie: {category}</p>
      {date}
      <div class="hours-info">
        <p><strong>Heures prestées:</strong> {performed}</p>
        <p><strong>Heures valorisées:</strong> {valued}</p>
      </div>
      <div class="description">
        <h2>Description</h2>
        <p>{description}</p>
      </div>
      <div class="preuves">
        <h2>Preuves</h2>
        {proofs}
      </div>
      <a id="back-link" href="/" class="back-link">← Retour au tableau</a>
    </div>
    <div id="image-lightbox" class="lightbox">
      <span class="lightbox-close">&times;</span>
      <img class="lightbox-content" id="lightbox-img">
      <div class="lightbox-caption"></div>
    </div>{embed}"#,
        name = html_escape(&activity.nom),
        category = html_escape(&activity.categorie),
        valued = display_hours(activity.heures_valorisees.as_ref()),
        description = html_escape(&activity.description),
        embed = instagram_embed(&activity.preuves),
    )
}

pub fn render_proof(proof: &ProofRef, asset_base: &str) -> String {
    let lien = proof.lien.as_str();
    let legende = proof.legende.as_deref().unwrap_or_default();
    let href = html_escape(lien);
    let caption = html_escape(legende);
    let kind = classify(lien);
    let src = if kind.is_local() {
        html_escape(&format!("{asset_base}/{lien}"))
    } else {
        href.clone()
    };

    match kind {
        ProofKind::Instagram => format!(
            r#"<div class="preuve-item instagram-embed"><a href="{href}" target="_blank" rel="noopener noreferrer">Voir le post Instagram</a><blockquote class="instagram-media" data-instgrm-permalink="{href}" data-instgrm-version="14"></blockquote>{legend}</div>
"#,
            legend = optional_caption("preuve-legend", &caption),
        ),
        ProofKind::Strava => format!(
            r#"<div class="preuve-item strava-badge-container"><a href="{href}" class="strava-badge- strava-badge-follow" target="_blank" rel="noopener noreferrer"><img src="{STRAVA_BADGE_SRC}" alt="Strava" /></a><p class="strava-caption">{text}</p></div>
"#,
            text = or_default(&caption, "Voir le profil Strava"),
        ),
        ProofKind::External => format!(
            r#"<div class="preuve-item"><a href="{href}" target="_blank" rel="noopener noreferrer">{text}</a></div>
"#,
            text = or_default(&caption, &href),
        ),
        ProofKind::Video => format!(
            r#"<div class="preuve-item video-preuve"><video controls><source src="{src}" type="{mime}">Votre navigateur ne supporte pas la lecture de vidéos.</video><p class="video-caption">{caption}</p></div>
"#,
            mime = video_mime(lien),
        ),
        ProofKind::Image => format!(
            r#"<div class="preuve-item image-preuve"><img src="{src}" alt="{caption}" class="zoomable-image" /><p class="image-caption">{caption}</p></div>
"#
        ),
        ProofKind::Pdf => format!(
            r#"<div class="preuve-item pdf-preuve"><div class="pdf-controls"><button class="btn-print" data-src="{src}">Imprimer</button><a class="btn-open" href="{src}" target="_blank" rel="noopener noreferrer">Ouvrir dans un nouvel onglet</a></div><iframe class="pdf-frame" src="{src}" title="{title}"></iframe>{legend}</div>
"#,
            title = or_default(&caption, "PDF"),
            legend = optional_caption("pdf-caption", &caption),
        ),
        ProofKind::OtherFile => format!(
            r#"<div class="preuve-item"><a href="{src}" target="_blank">{text}</a></div>
"#,
            text = or_default(&caption, &href),
        ),
    }
}

/// Loads the embed script, or asks an already loaded one to reprocess the page.
fn instagram_embed(proofs: &[ProofRef]) -> String {
    if !proofs
        .iter()
        .any(|proof| classify(&proof.lien) == ProofKind::Instagram)
    {
        return String::new();
    }
    format!(
        r#"
    <script>
      (function () {{
        if (document.querySelector('script[src*="instagram.com/embed.js"]')) {{
          if (window.instgrm) {{ window.instgrm.Embeds.process(); }}
          return;
        }}
        var script = document.createElement("script");
        script.async = true;
        script.src = "{INSTAGRAM_EMBED_SRC}";
        document.body.appendChild(script);
      }})();
    </script>"#
    )
}

pub fn render_detail_page(activity: &ActivityRecord, asset_base: &str) -> String {
    let body = format!(
        r#"<main class="app" id="detail-container">
    {}
  </main>"#,
        render_detail(activity, asset_base)
    );
    render_page(&activity.nom, "", &body)
}

/// Detail page whose content region is replaced by an inline error.
pub fn render_error_page(message: &str) -> String {
    let body = format!(
        r#"<main class="app" id="detail-container">
    <p class="error">Erreur: {}</p>
    <a href="/" class="back-link">← Retour au tableau</a>
  </main>"#,
        html_escape(message)
    );
    render_page("Erreur", "", &body)
}

fn render_page(title: &str, styles: &str, body: &str) -> String {
    PAGE_HTML
        .replace("{{TITLE}}", &html_escape(title))
        .replace("{{CATEGORY_STYLES}}", styles)
        .replace("{{BODY}}", body)
}

fn display_hours(value: Option<&HoursValue>) -> String {
    value
        .map(|hours| html_escape(&hours.to_string()))
        .unwrap_or_default()
}

fn optional_caption(class: &str, caption: &str) -> String {
    if caption.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="{class}">{caption}</p>"#)
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

fn video_mime(lien: &str) -> &'static str {
    match lien.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "webm" => "video/webm",
        Some(ext) if ext == "ogg" => "video/ogg",
        _ => "video/mp4",
    }
}

pub fn capitalize_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f6f4ef;
      --ink: #24221f;
      --muted: #6b645d;
      --card: #ffffff;
      --accent: #fc4c02;
      --shadow: 0 18px 40px rgba(36, 34, 31, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      padding: 10px 12px;
      border-bottom: 1px solid rgba(36, 34, 31, 0.08);
      text-align: left;
    }

    .category-label {
      font-weight: 600;
      vertical-align: top;
    }

    .total-row td {
      font-weight: 700;
      border-top: 2px solid var(--ink);
    }

    .activity-link {
      color: inherit;
    }

    .stats-grid,
    .activities-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
    }

    .stat-item,
    .activity-card {
      border: 1px solid rgba(36, 34, 31, 0.1);
      border-radius: 14px;
      padding: 12px;
      display: grid;
      gap: 6px;
    }

    .stat-value {
      font-size: 1.4rem;
      color: var(--accent);
    }

    .preuve-item img,
    .preuve-item video,
    .pdf-frame {
      max-width: 100%;
    }

    .pdf-frame {
      width: 100%;
      height: 480px;
      border: none;
    }

    .zoomable-image {
      cursor: zoom-in;
    }

    .lightbox {
      display: none;
    }

    .error {
      color: #c63b2b;
    }

    @media (max-width: 600px) {
      thead {
        display: none;
      }
      td {
        display: block;
      }
      td[data-label]::before {
        content: attr(data-label) ": ";
        font-weight: 600;
      }
    }
  </style>
  {{CATEGORY_STYLES}}
</head>
<body>
  {{BODY}}
</body>
</html>
"#;
