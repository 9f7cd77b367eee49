use prism_domain::{Identified, RecordId, SortDirection, SortSpec};

#[test]
fn sort_direction_accepts_only_allow_list() {
	assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
	assert_eq!(SortDirection::parse(" DESC "), Some(SortDirection::Desc));
	assert_eq!(SortDirection::parse("descending"), None);
	assert_eq!(SortDirection::parse_or_asc("sideways"), SortDirection::Asc);
}

#[test]
fn sort_spec_parses_name_and_direction() {
	assert_eq!(SortSpec::parse("id:desc"), Some(SortSpec::new("id", SortDirection::Desc)));
	assert_eq!(SortSpec::parse("title"), Some(SortSpec::new("title", SortDirection::Asc)));
	assert_eq!(SortSpec::parse("title:bogus"), Some(SortSpec::new("title", SortDirection::Asc)));
	assert_eq!(SortSpec::parse(" :desc"), None);
	assert_eq!(SortSpec::parse(""), None);
}

#[test]
fn record_id_serializes_as_bare_integer() {
	let raw = serde_json::to_value(RecordId(42)).expect("Failed to encode record id.");

	assert_eq!(raw, serde_json::json!(42));
	assert_eq!(RecordId::from(7).id(), RecordId(7));
	assert_eq!(RecordId(7).to_string(), "7");
}
