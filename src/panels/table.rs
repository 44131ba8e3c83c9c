//! Headless table renderer
//!
//! Interprets a [`TableConfig`]: fetches the whole collection from the
//! configured endpoint, sorts client-side, formats cells, and wires the
//! delete action through a confirmation hook followed by a full refetch.

use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::client::{Method, Transport};
use crate::panels::descriptor::{
    CellContent, ColumnDescriptor, ColumnKind, PillTone, TableConfig,
};
use crate::panels::error::PanelError;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Current sort state: which column key, which direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub order: SortOrder,
}

/// Generic table view driven by a [`TableConfig`]
pub struct TableView {
    config: TableConfig,
    transport: Arc<dyn Transport>,
    rows: Vec<Value>,
    sort: Option<SortState>,
    error: Option<String>,
    loaded: bool,
}

impl TableView {
    pub fn new(config: TableConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            rows: Vec::new(),
            sort: None,
            error: None,
            loaded: false,
        }
    }

    /// Fetch the collection (mount). The entire collection is loaded
    /// client-side; there is no pagination.
    pub async fn load(&mut self) -> Result<(), PanelError> {
        let envelope = self
            .transport
            .send(Method::Get, &self.config.endpoint, None)
            .await?;

        if envelope.success {
            self.rows = match envelope.data {
                Some(Value::Array(rows)) => rows,
                _ => Vec::new(),
            };
            self.error = None;
            self.loaded = true;
        } else {
            // Keep whatever rows we had; the failure is scoped to this fetch.
            self.error = envelope.error.or(Some("failed to load".to_string()));
        }

        Ok(())
    }

    /// Explicit refresh: same as the initial load
    pub async fn refresh(&mut self) -> Result<(), PanelError> {
        self.load().await
    }

    /// Whether the initial fetch has completed successfully
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// The fetch error, if the last load failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current sort state
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Handle a click on a column header.
    ///
    /// Re-sorting the same column toggles ascending → descending; switching
    /// columns resets to ascending. Clicks on non-sortable columns are
    /// ignored.
    pub fn sort_on(&mut self, key: &str) {
        let sortable = self
            .config
            .columns
            .iter()
            .any(|c| c.key == key && c.sortable);
        if !sortable {
            return;
        }

        self.sort = Some(match &self.sort {
            Some(current) if current.key == key => SortState {
                key: key.to_string(),
                order: match current.order {
                    SortOrder::Ascending => SortOrder::Descending,
                    SortOrder::Descending => SortOrder::Ascending,
                },
            },
            _ => SortState {
                key: key.to_string(),
                order: SortOrder::Ascending,
            },
        });
    }

    /// Rows in display order.
    ///
    /// Sorting is stable (`slice::sort_by`): rows whose sort keys compare
    /// equal keep their previous relative order.
    pub fn rows(&self) -> Vec<&Value> {
        let mut rows: Vec<&Value> = self.rows.iter().collect();

        if let Some(sort) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(
                    a.get(&sort.key).unwrap_or(&Value::Null),
                    b.get(&sort.key).unwrap_or(&Value::Null),
                );
                match sort.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        rows
    }

    /// Render one cell: the column's custom renderer when present, else the
    /// kind-based default formatter.
    pub fn cell(&self, column: &ColumnDescriptor, row: &Value) -> CellContent {
        let value = row.get(&column.key).unwrap_or(&Value::Null);

        if let Some(render) = column.render {
            return render(value, row);
        }

        if value.is_null() {
            return CellContent::Empty;
        }

        match column.kind {
            Some(ColumnKind::Date) => CellContent::Text(format_date(value)),
            Some(ColumnKind::Status) => {
                let label = scalar_text(value);
                CellContent::Pill {
                    tone: status_tone(&label),
                    label,
                }
            }
            Some(ColumnKind::Currency) => match value.as_f64() {
                Some(n) => CellContent::Text(format!("{:.2}", n)),
                None => CellContent::Text(scalar_text(value)),
            },
            _ => CellContent::Text(scalar_text(value)),
        }
    }

    /// Delete a row after confirmation, then refetch the collection.
    ///
    /// The confirmation hook is the headless stand-in for a blocking confirm
    /// prompt; when it returns false nothing is sent. Returns whether the
    /// row was deleted.
    pub async fn delete_row(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool, PanelError> {
        let prompt = format!("Delete this {}?", self.config.title.to_lowercase());
        if !confirm(&prompt) {
            return Ok(false);
        }

        let path = match &self.config.delete_endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), id),
            None => format!("{}/{}", self.config.endpoint.trim_end_matches('/'), id),
        };

        let envelope = self.transport.send(Method::Delete, &path, None).await?;

        if envelope.success {
            self.refresh().await?;
            Ok(true)
        } else {
            self.error = envelope.error.or(Some("delete failed".to_string()));
            Ok(false)
        }
    }
}

/// Total ordering over raw JSON cell values: null < bool < number < string
fn compare_cells(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Raw scalar to display text
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Default date formatting: RFC 3339 timestamps become `YYYY-MM-DD HH:MM`,
/// plain `YYYY-MM-DD` strings pass through, anything else renders raw.
fn format_date(value: &Value) -> String {
    let Some(s) = value.as_str() else {
        return scalar_text(value);
    };

    match chrono::DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => s.to_string(),
    }
}

/// Map a status string to a pill tone
fn status_tone(status: &str) -> PillTone {
    match status {
        "active" | "completed" | "done" | "approved" => PillTone::Success,
        "pending" | "in_progress" | "todo" | "draft" => PillTone::Warning,
        "inactive" | "cancelled" | "rejected" | "failed" | "expired" | "terminated" => {
            PillTone::Danger
        }
        _ => PillTone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecordingTransport;
    use crate::core::envelope::ApiResponse;
    use serde_json::json;

    fn services_config() -> TableConfig {
        TableConfig::new("Services", "/api/services").with_columns(vec![
            ColumnDescriptor::new("name", "Service").sortable(),
            ColumnDescriptor::new("base_price", "Price")
                .with_kind(ColumnKind::Currency)
                .sortable(),
            ColumnDescriptor::new("status", "Status").with_kind(ColumnKind::Status),
            ColumnDescriptor::new("created_at", "Created").with_kind(ColumnKind::Date),
        ])
    }

    fn view_with_rows(rows: Value) -> (TableView, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        transport.queue_response(ApiResponse::success(rows));
        (TableView::new(services_config(), transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_load_fetches_endpoint_once() {
        let (mut view, transport) = view_with_rows(json!([{"name": "Logo Design"}]));

        view.load().await.unwrap();

        assert!(view.loaded());
        assert_eq!(view.rows().len(), 1);
        assert_eq!(transport.request_count(), 1);
        assert_eq!(transport.requests()[0].path, "/api/services");
        assert_eq!(transport.requests()[0].method, Method::Get);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_rows_and_sets_error() {
        let (mut view, transport) = view_with_rows(json!([{"name": "Logo Design"}]));
        view.load().await.unwrap();

        transport.queue_response(ApiResponse::failure("Internal server error"));
        view.refresh().await.unwrap();

        assert_eq!(view.error(), Some("Internal server error"));
        assert_eq!(view.rows().len(), 1, "stale rows stay visible");
    }

    #[tokio::test]
    async fn test_sort_cycle_asc_desc_and_column_switch_resets() {
        let (mut view, _) = view_with_rows(json!([
            {"name": "SEO Audit", "base_price": 300.0},
            {"name": "Logo Design", "base_price": 100.0},
            {"name": "Web Development", "base_price": 2000.0}
        ]));
        view.load().await.unwrap();

        // First click: ascending by name
        view.sort_on("name");
        assert_eq!(view.sort().unwrap().order, SortOrder::Ascending);
        let names: Vec<&str> = view.rows().iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Logo Design", "SEO Audit", "Web Development"]);

        // Second click on the same column: descending
        view.sort_on("name");
        assert_eq!(view.sort().unwrap().order, SortOrder::Descending);
        let names: Vec<&str> = view.rows().iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Web Development", "SEO Audit", "Logo Design"]);

        // Switching columns resets to ascending on the new column
        view.sort_on("base_price");
        assert_eq!(view.sort().unwrap().key, "base_price");
        assert_eq!(view.sort().unwrap().order, SortOrder::Ascending);
        let prices: Vec<f64> = view
            .rows()
            .iter()
            .map(|r| r["base_price"].as_f64().unwrap())
            .collect();
        assert_eq!(prices, vec![100.0, 300.0, 2000.0]);
    }

    #[tokio::test]
    async fn test_sort_ignores_non_sortable_columns() {
        let (mut view, _) = view_with_rows(json!([{"name": "a", "status": "active"}]));
        view.load().await.unwrap();

        view.sort_on("status");
        assert!(view.sort().is_none());
    }

    #[tokio::test]
    async fn test_sort_is_stable_for_ties() {
        let (mut view, _) = view_with_rows(json!([
            {"name": "b", "base_price": 100.0, "tag": 1},
            {"name": "a", "base_price": 100.0, "tag": 2},
            {"name": "c", "base_price": 100.0, "tag": 3}
        ]));
        view.load().await.unwrap();

        // All prices equal: the fetched order must survive the sort.
        view.sort_on("base_price");
        let tags: Vec<i64> = view.rows().iter().map(|r| r["tag"].as_i64().unwrap()).collect();
        assert_eq!(tags, vec![1, 2, 3]);

        // And survive the descending pass too.
        view.sort_on("base_price");
        let tags: Vec<i64> = view.rows().iter().map(|r| r["tag"].as_i64().unwrap()).collect();
        assert_eq!(tags, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_key_sorts_as_null_first() {
        let (mut view, _) = view_with_rows(json!([
            {"name": "with", "base_price": 10.0},
            {"name": "without"}
        ]));
        view.load().await.unwrap();

        view.sort_on("base_price");
        let first = view.rows()[0]["name"].as_str().unwrap().to_string();
        assert_eq!(first, "without", "rows missing the key come first ascending");
    }

    #[tokio::test]
    async fn test_cell_formatting_defaults() {
        let (mut view, _) = view_with_rows(json!([{
            "name": "Logo Design",
            "base_price": 100.0,
            "status": "active",
            "created_at": "2024-03-01T10:30:00Z"
        }]));
        view.load().await.unwrap();
        let row = view.rows()[0].clone();

        let columns = services_config().columns;

        assert_eq!(view.cell(&columns[0], &row).text(), "Logo Design");
        assert_eq!(view.cell(&columns[1], &row).text(), "100.00");
        assert_eq!(
            view.cell(&columns[2], &row),
            CellContent::Pill {
                label: "active".to_string(),
                tone: PillTone::Success
            }
        );
        assert_eq!(view.cell(&columns[3], &row).text(), "2024-03-01 10:30");
    }

    #[tokio::test]
    async fn test_missing_cell_renders_placeholder() {
        let (mut view, _) = view_with_rows(json!([{"name": "Logo Design"}]));
        view.load().await.unwrap();
        let row = view.rows()[0].clone();

        let price = ColumnDescriptor::new("base_price", "Price");
        assert_eq!(view.cell(&price, &row), CellContent::Empty);
        assert_eq!(view.cell(&price, &row).text(), "-");
    }

    #[tokio::test]
    async fn test_custom_render_takes_precedence() {
        fn shout(value: &Value, _row: &Value) -> CellContent {
            CellContent::Text(value.as_str().unwrap_or("-").to_uppercase())
        }

        let (mut view, _) = view_with_rows(json!([{"name": "Logo Design"}]));
        view.load().await.unwrap();
        let row = view.rows()[0].clone();

        let column = ColumnDescriptor::new("name", "Service").with_render(shout);
        assert_eq!(view.cell(&column, &row).text(), "LOGO DESIGN");
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let (mut view, transport) = view_with_rows(json!([{"id": "x"}]));
        view.load().await.unwrap();

        let deleted = view.delete_row("x", |_| false).await.unwrap();

        assert!(!deleted);
        assert_eq!(transport.request_count(), 1, "only the initial load");
    }

    #[tokio::test]
    async fn test_delete_confirmed_hits_derived_endpoint_then_refetches() {
        let (mut view, transport) = view_with_rows(json!([{"id": "x"}]));
        view.load().await.unwrap();

        transport.queue_response(ApiResponse::message("service deleted"));
        transport.queue_response(ApiResponse::success(json!([])));

        let deleted = view.delete_row("x", |_| true).await.unwrap();
        assert!(deleted);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].path, "/api/services/x");
        assert_eq!(requests[2].method, Method::Get, "full refetch after delete");
        assert!(view.rows().is_empty());
    }

    #[tokio::test]
    async fn test_delete_uses_configured_delete_endpoint() {
        let transport = Arc::new(RecordingTransport::new());
        transport.queue_response(ApiResponse::success(json!([{"id": "x"}])));
        let config = services_config().with_delete_endpoint("/api/services/archive");
        let mut view = TableView::new(config, transport.clone());
        view.load().await.unwrap();

        transport.queue_response(ApiResponse::message("service deleted"));
        view.delete_row("x", |_| true).await.unwrap();

        assert_eq!(transport.requests()[1].path, "/api/services/archive/x");
    }

    #[test]
    fn test_status_tones() {
        assert_eq!(status_tone("active"), PillTone::Success);
        assert_eq!(status_tone("pending"), PillTone::Warning);
        assert_eq!(status_tone("terminated"), PillTone::Danger);
        assert_eq!(status_tone("whatever"), PillTone::Neutral);
    }

    #[test]
    fn test_compare_cells_mixed_types() {
        assert_eq!(compare_cells(&json!(null), &json!(1)), Ordering::Less);
        assert_eq!(compare_cells(&json!(false), &json!(true)), Ordering::Less);
        assert_eq!(compare_cells(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_cells(&json!("a"), &json!("b")), Ordering::Less);
        assert_eq!(compare_cells(&json!(5), &json!("a")), Ordering::Less);
    }
}
