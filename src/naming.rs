/*!
 * Naming templates and multi-episode name assembly.
 *
 * Templates are parsed once, at configuration validation, into a typed
 * segment list; an unrecognized placeholder is a [`TemplateError`] at parse
 * time rather than a surprise during a rename. Numeric placeholders render
 * zero-padded to two digits unless the template carries an explicit `:0N`
 * width.
 */

use crate::errors::TemplateError;
use crate::providers::{EpisodeRecord, SeriesRecord};

/// Characters illegal in filesystem paths on the platforms we care about
const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// The recognized placeholder set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    SeriesName,
    SeriesYear,
    EpisodeTitle,
    SeasonNum,
    EpisodeNum,
    AbsoluteNum,
    AiredDate,
}

impl Placeholder {
    /// Resolve a placeholder name from a template
    fn parse(name: &str) -> Option<Self> {
        match name {
            "series_name" => Some(Self::SeriesName),
            "series_year" => Some(Self::SeriesYear),
            "episode_title" => Some(Self::EpisodeTitle),
            "season_num" => Some(Self::SeasonNum),
            "episode_num" => Some(Self::EpisodeNum),
            "absolute_num" => Some(Self::AbsoluteNum),
            "aired_date" => Some(Self::AiredDate),
            _ => None,
        }
    }

    /// Whether the placeholder renders a number (and therefore zero-pads)
    fn is_numeric(self) -> bool {
        matches!(self, Self::SeasonNum | Self::EpisodeNum | Self::AbsoluteNum)
    }
}

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        placeholder: Placeholder,
        width: Option<usize>,
    },
}

/// A naming template parsed into typed segments
#[derive(Debug, Clone)]
pub struct NamingTemplate {
    segments: Vec<Segment>,
}

impl NamingTemplate {
    /// Parse a template string, failing loudly on anything unrecognized
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;
        let mut offset = 0usize;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let close = after_open
                .find('}')
                .ok_or(TemplateError::UnclosedPlaceholder(offset + open))?;
            let body = &after_open[..close];

            let (name, width) = match body.split_once(':') {
                Some((name, spec)) => (name, Some(parse_width(spec)?)),
                None => (body, None),
            };

            let placeholder = Placeholder::parse(name)
                .ok_or_else(|| TemplateError::UnknownPlaceholder(body.to_string()))?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field { placeholder, width });

            offset += open + 1 + close + 1;
            rest = &after_open[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Render the template for one episode of a series.
    ///
    /// Missing optional values (year, absolute number, aired date) render as
    /// empty strings.
    pub fn render(&self, series: &SeriesRecord, episode: &EpisodeRecord) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { placeholder, width } => {
                    out.push_str(&render_field(*placeholder, *width, series, episode));
                }
            }
        }
        out
    }
}

/// Parse the `0N` part of a `{name:0N}` width specifier
fn parse_width(spec: &str) -> Result<usize, TemplateError> {
    let digits = spec
        .strip_prefix('0')
        .ok_or_else(|| TemplateError::InvalidWidth(spec.to_string()))?;
    digits
        .parse::<usize>()
        .map_err(|_| TemplateError::InvalidWidth(spec.to_string()))
}

fn render_field(
    placeholder: Placeholder,
    width: Option<usize>,
    series: &SeriesRecord,
    episode: &EpisodeRecord,
) -> String {
    let pad = |n: u32| {
        let w = width.unwrap_or(if placeholder.is_numeric() { 2 } else { 0 });
        format!("{:0width$}", n, width = w)
    };

    match placeholder {
        Placeholder::SeriesName => series.name.clone(),
        Placeholder::SeriesYear => series.year.clone().unwrap_or_default(),
        Placeholder::EpisodeTitle => episode.name.clone(),
        Placeholder::SeasonNum => pad(episode.season_number),
        Placeholder::EpisodeNum => pad(episode.episode_number),
        Placeholder::AbsoluteNum => episode.absolute_number.map(pad).unwrap_or_default(),
        Placeholder::AiredDate => episode
            .aired
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    }
}

/// Assemble the season/episode tag for a sorted multi-episode run, e.g.
/// `S01E01E02`. All episodes are assumed to share the first one's season.
fn multi_episode_tag(sorted: &[EpisodeRecord]) -> String {
    let mut tag = format!("S{:02}", sorted[0].season_number);
    for episode in sorted {
        tag.push_str(&format!("E{:02}", episode.episode_number));
    }
    tag
}

/// Produce the proposed file name for one or more matched episodes.
///
/// A single episode goes through the naming template; two or more are sorted
/// by episode number and rendered as
/// `{series} - S01E01E02 - {title} + {title}`. The extension is appended
/// verbatim and the result is sanitized for the filesystem.
pub fn proposed_file_name(
    template: &NamingTemplate,
    series: &SeriesRecord,
    episodes: &[EpisodeRecord],
    extension: &str,
) -> String {
    debug_assert!(!episodes.is_empty());

    let base = if episodes.len() == 1 {
        template.render(series, &episodes[0])
    } else {
        let mut sorted = episodes.to_vec();
        sorted.sort_by_key(|e| e.episode_number);
        let titles: Vec<&str> = sorted.iter().map(|e| e.name.as_str()).collect();
        format!(
            "{} - {} - {}",
            series.name,
            multi_episode_tag(&sorted),
            titles.join(" + ")
        )
    };

    sanitize_filename(&format!("{}{}", base, extension))
}

/// Strip characters illegal in filesystem paths
pub fn sanitize_filename(name: &str) -> String {
    name.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect()
}
