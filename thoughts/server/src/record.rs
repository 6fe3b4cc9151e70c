use sea_orm::sea_query::{BinOper, Expr, Func, Order, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error type for record store operations shared by todos and notes.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// No record with this ID exists in the table.
    #[error("Record with ID {0} not found")]
    NotFound(i32),
    /// The ID in the request path is not an integer.
    #[error("Record ID '{0}' is not valid")]
    InvalidId(String),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Parses a record ID taken from a request path.
pub fn parse_record_id(raw: &str) -> Result<i32, RecordError> {
    raw.parse().map_err(|_| RecordError::InvalidId(raw.to_string()))
}

/// A submitted record after trimming, guaranteed to carry a non-empty title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    title: String,
    body: Option<String>,
    tag: Option<String>,
}

impl RecordDraft {
    /// Trims the submitted fields. Returns `None` when the title is blank.
    /// Blank body and tag are stored as absent.
    pub fn new(title: &str, body: &str, tag: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            body: non_empty(body),
            tag: non_empty(tag),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Comments for a todo, description for a note.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, Option<String>) {
        (self.title, self.body, self.tag)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Ordering of a listing by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` sorts newest first; any other value, or none, sorts oldest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn is_desc(&self) -> bool {
        *self == SortOrder::Desc
    }

    fn order(self) -> Order {
        match self {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Raw listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// The active filters of a listing. Absent filters impose no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    tag: Option<String>,
    search: Option<String>,
    sort: SortOrder,
}

impl ListFilter {
    /// The tag is matched verbatim, the search text is trimmed. Empty values
    /// disable the filter.
    pub fn new(tag: Option<String>, search: Option<String>, sort: SortOrder) -> Self {
        Self {
            tag: tag.filter(|tag| !tag.is_empty()),
            search: search.as_deref().and_then(non_empty),
            sort,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// The tag filter for echoing back into a form, empty when inactive.
    pub fn tag_str(&self) -> &str {
        self.tag().unwrap_or_default()
    }

    /// The search filter for echoing back into a form, empty when inactive.
    pub fn search_str(&self) -> &str {
        self.search().unwrap_or_default()
    }
}

impl From<ListQuery> for ListFilter {
    fn from(query: ListQuery) -> Self {
        let sort = SortOrder::parse(query.sort.as_deref());
        ListFilter::new(query.tag, query.search, sort)
    }
}

/// One autocomplete hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TitleMatch {
    /// Record ID
    pub id: i32,
    /// Record title
    pub title: String,
}

/// The columns every record table carries.
#[derive(Debug, Clone, Copy)]
pub struct RecordColumns<C> {
    pub id: C,
    pub title: C,
    pub tag: C,
    pub created_at: C,
}

/// Builds the listing query: the active filters joined with AND, ordered by
/// `created_at` with `id` as the tie breaker in the same direction.
pub fn filtered_select<E>(columns: RecordColumns<E::Column>, filter: &ListFilter) -> Select<E>
where
    E: EntityTrait,
    E::Column: 'static,
{
    let mut select = E::find();
    if let Some(tag) = filter.tag() {
        select = select.filter(columns.tag.eq(tag));
    }
    if let Some(search) = filter.search() {
        select = select.filter(title_contains(columns.title, search));
    }

    let order = filter.sort().order();
    select
        .order_by(columns.created_at, order.clone())
        .order_by(columns.id, order)
}

/// Case-insensitive substring match, `LOWER(title) LIKE LOWER('%needle%')`.
fn title_contains<C>(title: C, needle: &str) -> SimpleExpr
where
    C: ColumnTrait + 'static,
{
    SimpleExpr::Binary(
        Box::new(Func::lower(Expr::col(title)).into()),
        BinOper::Like,
        Box::new(Func::lower(Expr::val(format!("%{needle}%"))).into()),
    )
}

/// Distinct non-empty tags of the whole table, alphabetically.
pub async fn distinct_tags<E, C>(
    db: &C,
    columns: RecordColumns<E::Column>,
) -> Result<Vec<String>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find()
        .select_only()
        .column(columns.tag)
        .distinct()
        .filter(columns.tag.is_not_null())
        .filter(columns.tag.ne(""))
        .order_by_asc(columns.tag)
        .into_tuple::<String>()
        .all(db)
        .await
}

/// Records whose title contains `query`, oldest first. A blank query matches nothing.
pub async fn title_matches<E, C>(
    db: &C,
    columns: RecordColumns<E::Column>,
    query: &str,
) -> Result<Vec<TitleMatch>, DbErr>
where
    E: EntityTrait,
    E::Column: 'static,
    C: ConnectionTrait,
{
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let filter = ListFilter::new(None, Some(query.to_string()), SortOrder::Asc);
    let rows = filtered_select::<E>(columns, &filter)
        .select_only()
        .column(columns.id)
        .column(columns.title)
        .into_tuple::<(i32, String)>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, title)| TitleMatch { id, title })
        .collect())
}
