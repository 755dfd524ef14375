//! Interactive session: explicit commands dispatched against caller-owned state.
//!
//! The [`Explorer`] holds only clients and is stateless between calls. Everything
//! that changes during a session lives in [`SessionState`], which the caller owns
//! and passes to [`Explorer::dispatch`].

use std::path::PathBuf;

use crate::client::{
    GeminiClient, GitHubClient, HttpClient, KaggleClient, PapersWithCodeClient, SecondarySource,
    SemanticScholarClient, ZenodoClient,
};
use crate::config::{Config, api};
use crate::enrichment::{Enrichment, enrich};
use crate::error::{ExplorerError, ExplorerResult};
use crate::formatters;
use crate::models::{ExportFormat, PaperRecord, QueryKind, SearchQuery, SortKey};
use crate::normalize::normalize;
use crate::processor::{self, Page, YearRange};
use crate::router;
use crate::summary::{self, TextGenerator};
use crate::export;

/// State of one interactive session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The active search, including its year bounds.
    pub query: Option<SearchQuery>,

    /// Every record from the active search, in upstream order.
    pub records: Vec<PaperRecord>,

    /// Filtered and sorted view of `records`.
    pub view: Vec<PaperRecord>,

    /// Ordering applied to the view. Persists across searches.
    pub sort_key: SortKey,

    /// 1-based page cursor into `view`.
    pub page: usize,

    /// Saved records. Persist across searches.
    pub bookmarks: Vec<PaperRecord>,
}

impl SessionState {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self { page: 1, ..Self::default() }
    }

    /// The active year filter.
    #[must_use]
    pub fn year_range(&self) -> YearRange {
        self.query
            .as_ref()
            .map(|q| YearRange { from: q.year_from, to: q.year_to })
            .unwrap_or_default()
    }

    /// Earliest and latest year across all records, if any record has one.
    #[must_use]
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let years = self.records.iter().filter_map(|r| r.year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    /// The current page of the view.
    #[must_use]
    pub fn current_page(&self, page_size: usize) -> Page<'_> {
        processor::paginate(&self.view, self.page, page_size)
    }

    /// The record at a 1-based position in the view.
    pub fn record_at(&self, index: usize) -> ExplorerResult<&PaperRecord> {
        index
            .checked_sub(1)
            .and_then(|i| self.view.get(i))
            .ok_or_else(|| {
                ExplorerError::validation(
                    "index",
                    format!("no paper #{index} in the current results ({} shown)", self.view.len()),
                )
            })
    }

    /// Replace the result set wholesale, clearing any year filter.
    fn replace_results(&mut self, query: SearchQuery, records: Vec<PaperRecord>) {
        self.view = processor::process(&records, None, None, self.sort_key).unwrap_or_default();
        self.records = records;
        self.query = Some(query);
        self.page = 1;
    }

    /// Recompute the view for new bounds. Leaves state untouched on a reversed range.
    fn apply_filter(&mut self, from: Option<i32>, to: Option<i32>) -> ExplorerResult<()> {
        let view = processor::process(&self.records, from, to, self.sort_key)?;
        if let Some(query) = self.query.as_mut() {
            query.year_from = from;
            query.year_to = to;
        }
        self.view = view;
        self.page = 1;
        Ok(())
    }

    /// Rebuild the view from upstream order so ties keep relevance order.
    fn apply_sort(&mut self, sort_key: SortKey) -> ExplorerResult<()> {
        let range = self.year_range();
        self.view = processor::process(&self.records, range.from, range.to, sort_key)?;
        self.sort_key = sort_key;
        if let Some(query) = self.query.as_mut() {
            query.sort_key = sort_key;
        }
        self.page = 1;
        Ok(())
    }

    /// Add a bookmark; returns false if the record was already saved.
    fn bookmark(&mut self, record: PaperRecord) -> bool {
        if self.bookmarks.iter().any(|b| b.same_paper(&record)) {
            return false;
        }
        self.bookmarks.push(record);
        true
    }
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search by topic, DOI, or paper URL.
    Search(String),
    /// Restrict the view to a year interval.
    ApplyFilter {
        /// Lower bound (inclusive).
        from: Option<i32>,
        /// Upper bound (inclusive).
        to: Option<i32>,
    },
    /// Remove the year filter.
    ClearFilter,
    /// Change the ordering.
    Sort(SortKey),
    /// Jump to a page.
    Page(usize),
    /// Next page.
    NextPage,
    /// Previous page.
    PrevPage,
    /// Show one record in full.
    Show(usize),
    /// Look up code and datasets for a record.
    Enrich(usize),
    /// Ask the language model to critique a record's abstract.
    RequestSummary(usize),
    /// Save a record.
    Bookmark(usize),
    /// List saved records.
    Bookmarks,
    /// Write the view to a file.
    Export {
        /// Output path.
        path: PathBuf,
        /// Output format.
        format: ExportFormat,
    },
    /// Show usage.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse one line of input.
    ///
    /// A line is a command only when its first word is a command word and the rest
    /// fits that command; everything else is a search, so `page rank` or
    /// `export control regimes` look up papers.
    pub fn parse(line: &str) -> ExplorerResult<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ExplorerError::validation("command", "empty input"));
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let command = parse_command(&word.to_lowercase(), rest.trim())
            .unwrap_or_else(|| Self::Search(line.to_string()));

        Ok(command)
    }
}

fn parse_command(word: &str, rest: &str) -> Option<Command> {
    let bare = |command: Command| rest.is_empty().then_some(command);

    match word {
        "search" | "s" => Some(Command::Search(rest.to_string())),
        "filter" | "f" => parse_filter(rest),
        "clear" => bare(Command::ClearFilter),
        "sort" => SortKey::parse(rest).map(Command::Sort),
        "page" | "p" => rest.parse().ok().map(Command::Page),
        "next" | "n" => bare(Command::NextPage),
        "prev" | "previous" => bare(Command::PrevPage),
        "show" => rest.parse().ok().map(Command::Show),
        "enrich" | "code" => rest.parse().ok().map(Command::Enrich),
        "summary" | "ai" => rest.parse().ok().map(Command::RequestSummary),
        "bookmark" | "bm" => rest.parse().ok().map(Command::Bookmark),
        "bookmarks" => bare(Command::Bookmarks),
        "export" => parse_export(rest),
        "help" | "?" => bare(Command::Help),
        "quit" | "exit" | "q" => bare(Command::Quit),
        _ => None,
    }
}

/// `export` alone, or with a single `.csv`/`.json` path.
fn parse_export(rest: &str) -> Option<Command> {
    if rest.is_empty() {
        let path = ExportFormat::Csv.default_file_name();
        return Some(Command::Export { path: PathBuf::from(path), format: ExportFormat::Csv });
    }

    let lowered = rest.to_lowercase();
    let is_export_file = !rest.contains(char::is_whitespace)
        && (lowered.ends_with(".csv") || lowered.ends_with(".json"));
    is_export_file.then(|| Command::Export {
        path: PathBuf::from(rest),
        format: ExportFormat::from_path(rest),
    })
}

fn parse_year(s: &str) -> Option<Option<i32>> {
    match s {
        "-" | "*" | "any" => Some(None),
        _ => s.parse().ok().map(Some),
    }
}

fn parse_filter(rest: &str) -> Option<Command> {
    if rest.eq_ignore_ascii_case("clear") || rest.eq_ignore_ascii_case("off") {
        return Some(Command::ClearFilter);
    }
    match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
        [from, to] => Some(Command::ApplyFilter { from: parse_year(from)?, to: parse_year(to)? }),
        _ => None,
    }
}

/// Result of dispatching a command.
#[derive(Debug)]
pub enum Outcome {
    /// The view changed; render the current page.
    Results,
    /// The primary search returned nothing.
    NoData,
    /// The command was rejected; state is unchanged.
    Rejected(ExplorerError),
    /// Show a record in full.
    Record(usize),
    /// Code and dataset links for a record.
    Enrichment {
        /// 1-based index of the record.
        index: usize,
        /// Lookup results.
        enrichment: Enrichment,
    },
    /// AI critique text (or an advisory).
    Summary {
        /// 1-based index of the record.
        index: usize,
        /// Generated text.
        text: String,
    },
    /// Bookmark attempt.
    Bookmarked {
        /// False if it was already saved.
        added: bool,
    },
    /// List bookmarks.
    Bookmarks,
    /// Export finished.
    Exported {
        /// Output path.
        path: PathBuf,
        /// Records written.
        count: usize,
    },
    /// Show usage.
    Help,
    /// End the session.
    Quit,
}

impl Outcome {
    /// Render this outcome for display.
    #[must_use]
    pub fn render(&self, state: &SessionState, page_size: usize) -> String {
        match self {
            Self::Results => {
                let mut output =
                    formatters::format_page(&state.current_page(page_size), state.view.len());
                let range = state.year_range();
                let years = if range.is_active() {
                    Some(format!("Year filter: {} to {}", bound(range.from), bound(range.to)))
                } else {
                    state.year_span().map(|(min, max)| format!("Years available: {min} to {max}"))
                };

                output.push('\n');
                if let Some(years) = years {
                    output.push_str(&years);
                    output.push_str(" | ");
                }
                output.push_str(&format!("Sort: {}", state.sort_key.label()));
                output
            }
            Self::NoData => "No papers found.".to_string(),
            Self::Rejected(e) => e.to_user_message(),
            Self::Record(index) => state
                .record_at(*index)
                .map(|r| formatters::format_record_detail(r, *index))
                .unwrap_or_else(|e| e.to_user_message()),
            Self::Enrichment { index, enrichment } => state
                .record_at(*index)
                .map(|r| formatters::format_enrichment(r, enrichment))
                .unwrap_or_else(|e| e.to_user_message()),
            Self::Summary { index, text } => format!("# AI Summary for paper #{index}\n\n{text}"),
            Self::Bookmarked { added: true } => "Added to bookmarks.".to_string(),
            Self::Bookmarked { added: false } => "Already bookmarked.".to_string(),
            Self::Bookmarks => formatters::format_bookmarks(&state.bookmarks),
            Self::Exported { path, count } => {
                format!("Exported {count} papers to {}", path.display())
            }
            Self::Help => HELP.to_string(),
            Self::Quit => "Goodbye.".to_string(),
        }
    }
}

fn bound(year: Option<i32>) -> String {
    year.map_or_else(|| "any".to_string(), |y| y.to_string())
}

const HELP: &str = "\
Commands:
  <topic> | search <topic|DOI|URL>   search for papers
  filter <from> <to>                 keep papers published in [from, to] (- for open)
  filter clear | clear               remove the year filter
  sort newest | sort citations       change ordering
  page <n> | next | prev             move between pages
  show <i>                           full details for paper #i
  enrich <i>                         code and dataset links for paper #i
  summary <i>                        AI critique of paper #i's abstract
  bookmark <i> | bookmarks           save paper #i / list saved papers
  export [file.csv|file.json]        write results to CSV or JSON
  help | quit";

/// Stateless core: routes commands to clients and the processor.
pub struct Explorer {
    primary: SemanticScholarClient,
    secondary: Vec<Box<dyn SecondarySource>>,
    generator: Box<dyn TextGenerator>,
    model: String,
    page_size: usize,
}

impl Explorer {
    /// Build every client from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = HttpClient::new(config)?;

        let secondary: Vec<Box<dyn SecondarySource>> = vec![
            Box::new(PapersWithCodeClient::new(http.clone(), config)),
            Box::new(GitHubClient::new(http.clone(), config)),
            Box::new(ZenodoClient::new(http.clone(), config)),
            Box::new(KaggleClient::new(http.clone(), config)),
        ];

        Ok(Self {
            primary: SemanticScholarClient::new(http.clone(), config),
            secondary,
            generator: Box::new(GeminiClient::new(http, config)),
            model: config.llm_model.clone(),
            page_size: api::PAGE_SIZE,
        })
    }

    /// Records per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Run the primary lookup for a query and normalize the hits.
    pub async fn search(&self, query: &SearchQuery) -> Vec<PaperRecord> {
        let hits = match query.kind {
            QueryKind::Topic => self.primary.search_papers(&query.target, api::PRIMARY_LIMIT).await,
            QueryKind::Doi => {
                self.primary.get_paper_by_doi(&query.target).await.into_iter().collect()
            }
            QueryKind::IdentifierUrl => {
                self.primary.get_paper(&query.target).await.into_iter().collect()
            }
        };
        hits.into_iter().map(normalize).collect()
    }

    /// Look up code and datasets for a record.
    pub async fn enrich(&self, record: &PaperRecord) -> Enrichment {
        enrich(record, &self.secondary).await
    }

    /// Critique a record's abstract.
    pub async fn summarize(&self, record: &PaperRecord) -> String {
        summary::summarize(record, self.generator.as_ref(), &self.model).await
    }

    /// Execute one command against `state`.
    pub async fn dispatch(&self, state: &mut SessionState, command: Command) -> Outcome {
        match self.try_dispatch(state, command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(error = %e, "Command rejected");
                Outcome::Rejected(e)
            }
        }
    }

    async fn try_dispatch(
        &self,
        state: &mut SessionState,
        command: Command,
    ) -> ExplorerResult<Outcome> {
        match command {
            Command::Search(raw) => {
                if raw.trim().is_empty() {
                    return Err(ExplorerError::validation("query", "cannot be empty"));
                }
                let query = router::parse_query(&raw, state.sort_key);
                tracing::info!(kind = ?query.kind, target = %query.target, "Searching");

                let records = self.search(&query).await;
                if records.is_empty() {
                    return Ok(Outcome::NoData);
                }
                state.replace_results(query, records);
                Ok(Outcome::Results)
            }
            Command::ApplyFilter { from, to } => {
                require_results(state)?;
                state.apply_filter(from, to)?;
                Ok(Outcome::Results)
            }
            Command::ClearFilter => {
                require_results(state)?;
                state.apply_filter(None, None)?;
                Ok(Outcome::Results)
            }
            Command::Sort(sort_key) => {
                state.apply_sort(sort_key)?;
                Ok(Outcome::Results)
            }
            Command::Page(page) => {
                require_results(state)?;
                state.page = processor::paginate(&state.view, page, self.page_size).number;
                Ok(Outcome::Results)
            }
            Command::NextPage => {
                require_results(state)?;
                state.page =
                    processor::paginate(&state.view, state.page + 1, self.page_size).number;
                Ok(Outcome::Results)
            }
            Command::PrevPage => {
                require_results(state)?;
                state.page = state.page.saturating_sub(1).max(1);
                Ok(Outcome::Results)
            }
            Command::Show(index) => {
                state.record_at(index)?;
                Ok(Outcome::Record(index))
            }
            Command::Enrich(index) => {
                let enrichment = self.enrich(state.record_at(index)?).await;
                Ok(Outcome::Enrichment { index, enrichment })
            }
            Command::RequestSummary(index) => {
                let text = self.summarize(state.record_at(index)?).await;
                Ok(Outcome::Summary { index, text })
            }
            Command::Bookmark(index) => {
                let record = state.record_at(index)?.clone();
                Ok(Outcome::Bookmarked { added: state.bookmark(record) })
            }
            Command::Bookmarks => Ok(Outcome::Bookmarks),
            Command::Export { path, format } => {
                require_results(state)?;
                let count = export::write(&state.view, format, &path)?;
                Ok(Outcome::Exported { path, count })
            }
            Command::Help => Ok(Outcome::Help),
            Command::Quit => Ok(Outcome::Quit),
        }
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("primary", &self.primary)
            .field("secondary", &self.secondary.len())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

fn require_results(state: &SessionState) -> ExplorerResult<()> {
    if state.query.is_none() {
        return Err(ExplorerError::validation("search", "search for papers first"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, year: Option<i32>, citations: u32) -> PaperRecord {
        PaperRecord { title: title.into(), year, citation_count: citations, ..Default::default() }
    }

    fn searched(records: Vec<PaperRecord>) -> SessionState {
        let mut state = SessionState::new();
        state.replace_results(router::parse_query("topic", SortKey::Newest), records);
        state
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("filter 2020 2022").unwrap(),
            Command::ApplyFilter { from: Some(2020), to: Some(2022) }
        );
        assert_eq!(
            Command::parse("filter - 2010").unwrap(),
            Command::ApplyFilter { from: None, to: Some(2010) }
        );
        assert_eq!(Command::parse("filter clear").unwrap(), Command::ClearFilter);
        assert_eq!(
            Command::parse("sort citations").unwrap(),
            Command::Sort(SortKey::MostCitations)
        );
        assert_eq!(Command::parse("summary 3").unwrap(), Command::RequestSummary(3));
        assert_eq!(
            Command::parse("federated learning").unwrap(),
            Command::Search("federated learning".into())
        );
        assert_eq!(
            Command::parse("export out.json").unwrap(),
            Command::Export { path: PathBuf::from("out.json"), format: ExportFormat::Json }
        );
        assert_eq!(
            Command::parse("export").unwrap(),
            Command::Export {
                path: PathBuf::from("research_papers.csv"),
                format: ExportFormat::Csv
            }
        );
    }

    #[test]
    fn test_parse_only_rejects_empty_input() {
        assert!(Command::parse("   ").is_err());
    }

    #[test]
    fn test_topics_starting_with_command_words_are_searches() {
        for line in [
            "next generation sequencing",
            "clear air turbulence",
            "page rank",
            "show me graph papers",
            "export control regimes",
            "help desk automation",
            "sort sideways",
            "filter 2020",
            "page two",
        ] {
            assert_eq!(Command::parse(line).unwrap(), Command::Search(line.into()), "{line}");
        }
    }

    #[test]
    fn test_bare_commands_still_parse() {
        assert_eq!(Command::parse("next").unwrap(), Command::NextPage);
        assert_eq!(Command::parse("Clear").unwrap(), Command::ClearFilter);
        assert_eq!(Command::parse("page 3").unwrap(), Command::Page(3));
        assert_eq!(
            Command::parse("export Notes.CSV").unwrap(),
            Command::Export { path: PathBuf::from("Notes.CSV"), format: ExportFormat::Csv }
        );
    }

    #[test]
    fn test_invalid_range_leaves_view_unfiltered() {
        let mut state = searched(vec![record("a", Some(2001), 0), record("b", Some(2024), 0)]);
        let err = state.apply_filter(Some(2030), Some(2010)).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidRange { .. }));
        assert_eq!(state.view.len(), 2);
        assert!(!state.year_range().is_active());
    }

    #[test]
    fn test_year_span() {
        let state = searched(vec![
            record("a", Some(2001), 0),
            record("b", None, 0),
            record("c", Some(2024), 0),
        ]);
        assert_eq!(state.year_span(), Some((2001, 2024)));
        assert_eq!(searched(vec![record("x", None, 0)]).year_span(), None);
    }

    #[test]
    fn test_bookmark_dedup() {
        let mut state = searched(vec![record("a", Some(2001), 0)]);
        let first = state.record_at(1).unwrap().clone();
        assert!(state.bookmark(first.clone()));
        assert!(!state.bookmark(first));
        assert_eq!(state.bookmarks.len(), 1);
    }

    #[test]
    fn test_record_at_is_one_based() {
        let state = searched(vec![record("a", Some(2001), 0)]);
        assert_eq!(state.record_at(1).unwrap().title, "a");
        assert!(state.record_at(0).is_err());
        assert!(state.record_at(2).is_err());
    }

    #[test]
    fn test_resort_restores_upstream_order_for_ties() {
        let mut state = searched(vec![
            record("a", Some(2020), 1),
            record("b", Some(2020), 9),
            record("c", Some(2020), 5),
        ]);
        let order = |state: &SessionState| -> Vec<String> {
            state.view.iter().map(|r| r.title.clone()).collect()
        };
        assert_eq!(order(&state), ["a", "b", "c"]);

        state.apply_sort(SortKey::MostCitations).unwrap();
        assert_eq!(order(&state), ["b", "c", "a"]);

        state.apply_sort(SortKey::Newest).unwrap();
        assert_eq!(order(&state), ["a", "b", "c"]);
    }

    #[test]
    fn test_resort_keeps_active_filter() {
        let mut state = searched(vec![
            record("old", Some(1999), 90),
            record("mid", Some(2015), 3),
            record("new", Some(2022), 7),
        ]);
        state.apply_filter(Some(2010), None).unwrap();
        state.apply_sort(SortKey::MostCitations).unwrap();
        assert_eq!(state.view.len(), 2);
        assert_eq!(state.view[0].title, "new");
    }

    #[test]
    fn test_sort_persists_into_new_search() {
        let mut state =
            searched(vec![record("low", Some(2024), 1), record("high", Some(2001), 50)]);
        state.apply_sort(SortKey::MostCitations).unwrap();
        assert_eq!(state.view[0].title, "high");

        state.replace_results(
            router::parse_query("other", state.sort_key),
            vec![record("x", Some(2020), 1), record("y", Some(2020), 9)],
        );
        assert_eq!(state.view[0].title, "y");
        assert_eq!(state.query.as_ref().unwrap().sort_key, SortKey::MostCitations);
    }
}
