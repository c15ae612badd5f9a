/// Source header of the data dictionary export, in order. The loader
/// rejects files whose header does not match this exactly.
pub const DICTIONARY_SOURCE_COLUMNS: [&str; 8] = [
    "Code",
    "Description",
    "Code Type",
    "Format Group",
    "Format Subgroup",
    "Category Group",
    "Category Subgroup",
    "Age Group",
];

/// Code type retained from the data dictionary; every other type is discarded.
pub const ITEM_COLLECTION_CODE_TYPE: &str = "ItemCollection";

/// Default source column names in the checkout CSV export.
pub const EXPORT_COLLECTION_COLUMN: &str = "Collection";
pub const EXPORT_TITLE_COLUMN: &str = "ItemTitle";
pub const EXPORT_SUBJECTS_COLUMN: &str = "Subjects";
pub const EXPORT_DATE_COLUMN: &str = "CheckoutDateTime";

/// Default field names in Socrata API payloads.
pub const API_COLLECTION_FIELD: &str = "collection";
pub const API_TITLE_FIELD: &str = "itemtitle";
pub const API_SUBJECTS_FIELD: &str = "subjects";
pub const API_DATE_FIELD: &str = "checkoutdatetime";

/// Timestamp formats
pub const EXPORT_DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";
pub const API_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Titles lumped into the Equipment format group / Kit subgroup.
pub const EQUIPMENT_TITLES: [&str; 3] = [
    "SPL HotSpot connecting Seattle",
    "FlexTech Laptops",
    "In Building Device Checkout",
];

/// Format groups folded into "Other".
pub const ELECTRONIC_FORMAT_GROUPS: [&str; 1] = ["Electronic"];

/// Category groups folded into "Other".
pub const MISC_CATEGORY_GROUPS: [&str; 5] =
    ["Miscellaneous", "On Order", "Temporary", "WTBBL", "Periodical"];

pub const EQUIPMENT_FORMAT_GROUP: &str = "Equipment";
pub const KIT_FORMAT_SUBGROUP: &str = "Kit";
pub const OTHER_LABEL: &str = "Other";

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1_000_000;
pub const DEFAULT_BASE_NAME: &str = "seattle_lib";
pub const DEFAULT_API_LIMIT: u64 = 1_000_000;
pub const DEFAULT_API_BASE_URL: &str = "data.seattle.gov";
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Chunk artifact extensions
pub const GZIP_CHUNK_EXT: &str = "csv.gz";
pub const PLAIN_CHUNK_EXT: &str = "csv";

/// Imputation defaults
pub const DEFAULT_IMPUTE_WINDOW: usize = 3;
