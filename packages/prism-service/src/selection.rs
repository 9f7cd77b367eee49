use prism_presenter::{Presenter, Selection};
use prism_query::QueryParams;

pub const INCLUDE: &str = "include";
pub const OPTIONAL_FIELDS: &str = "optional_fields";

/// Reads `include` and `optional_fields`. Includes the presenter does not allow are dropped.
pub fn selection_from_params<P>(presenter: &P, params: &QueryParams) -> Selection
where
	P: Presenter,
{
	let requested = params.list(INCLUDE);
	let includes: Vec<String> = match presenter.allowed_includes() {
		Some(allowed) => {
			let (kept, dropped): (Vec<String>, Vec<String>) =
				requested.into_iter().partition(|name| allowed.contains(&name.as_str()));

			if !dropped.is_empty() {
				tracing::debug!(?dropped, "Ignoring includes the presenter does not allow.");
			}

			kept
		},
		None => requested,
	};

	Selection::new().with_associations(includes).with_fields(params.list(OPTIONAL_FIELDS))
}
