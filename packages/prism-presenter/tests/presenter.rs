use std::cell::Cell;

use time::macros::datetime;

use prism_domain::{Identified, RecordId};
use prism_presenter::{
	AssociationField, AssociationValue, Error, LookupTable, Pipeline, PresentedMap,
	PresentedStruct, PresentedValue, Presenter, PresenterRegistry, Record, Result, Selection,
};
use prism_testkit::{
	Row,
	fixtures::{self, BOB},
};

#[derive(Default)]
struct CheesePresenter {
	preloads: Cell<usize>,
	length_calls: Cell<usize>,
}
impl Presenter for CheesePresenter {
	type Record = Row;

	fn present<'a>(&'a self, cheese: &'a Row) -> Result<PresentedStruct<'a, Row>> {
		let flavor = cheese.column("flavor").unwrap_or(PresentedValue::Null);
		let length = flavor.as_str().map(str::len).unwrap_or_default() as i64;

		Ok(PresentedStruct::new()
			.value("id", cheese.id())
			.value("flavor", flavor)
			.association("user", AssociationField::accessor("user")?)
			.optional("flavor_length", move || {
				self.length_calls.set(self.length_calls.get() + 1);

				length
			}))
	}

	fn custom_preload(&self, _: &[Row], _: &Selection) -> Result<()> {
		self.preloads.set(self.preloads.get() + 1);

		Ok(())
	}
}

#[derive(Default)]
struct UserPresenter {
	lookups: Cell<usize>,
	lookup_batch: Cell<usize>,
}
impl Presenter for UserPresenter {
	type Record = Row;

	fn present<'a>(&'a self, user: &'a Row) -> Result<PresentedStruct<'a, Row>> {
		let mut profile = PresentedMap::new();

		profile.insert("joined_on", user.column("joined_on").unwrap_or(PresentedValue::Null));
		profile.insert(
			"history",
			PresentedValue::List(vec![
				datetime!(1970-01-02 00:00 UTC).into(),
				datetime!(2024-03-01 12:00).into(),
			]),
		);

		Ok(PresentedStruct::new()
			.value("id", user.id())
			.value("username", user.column("username").unwrap_or(PresentedValue::Null))
			.value("joined_on", user.column("joined_on").unwrap_or(PresentedValue::Null))
			.value("profile", profile)
			.association("cheeses", AssociationField::accessor("cheeses")?)
			.association(
				"favorite_cheeses",
				AssociationField::lookup(move |users: &[Row]| {
					self.lookups.set(self.lookups.get() + 1);
					self.lookup_batch.set(users.len());

					Ok(users
						.iter()
						.filter_map(|user| {
							let owned = fixtures::cheese_ids_owned_by(user.id().get());

							if owned.is_empty() {
								return None;
							}

							let favorites = owned.into_iter().take(2).map(RecordId);

							Some((user.id(), AssociationValue::records(favorites)))
						})
						.collect::<LookupTable>())
				}),
			)
			.association(
				"greeting",
				AssociationField::inline(|user: &Row| {
					let name =
						user.column("username").and_then(|name| name.as_str().map(str::to_string));

					Ok(AssociationValue::value(format!("hello {}", name.unwrap_or_default())))
				}),
			))
	}
}

struct BarePresenter;
impl Presenter for BarePresenter {
	type Record = Row;
}

fn cheese(id: i64) -> Row {
	fixtures::cheeses()
		.into_iter()
		.find(|cheese| cheese.id() == RecordId(id))
		.expect("Fixture cheese must exist.")
}

fn int(value: i64) -> PresentedValue {
	PresentedValue::Int(value)
}

fn ids(raw: &[i64]) -> PresentedValue {
	PresentedValue::List(raw.iter().copied().map(PresentedValue::Int).collect())
}

#[test]
fn foreign_key_shortcut_applies_without_a_request() {
	let presenter = CheesePresenter::default();
	let presented = Pipeline::new(&presenter)
		.present_one(&cheese(2), &Selection::new())
		.expect("Presentation must succeed.");

	assert_eq!(presented.get("user_id"), Some(&int(BOB)));
	assert!(!presented.contains_key("user"));
	assert_eq!(presented.keys().collect::<Vec<_>>(), vec!["id", "flavor", "user_id"]);
}

#[test]
fn unrequested_associations_without_a_foreign_key_are_dropped() {
	let presenter = UserPresenter::default();
	let users = fixtures::users();
	let presented = Pipeline::new(&presenter)
		.present_batch(&users, &Selection::new())
		.expect("Presentation must succeed.");

	for map in &presented {
		for key in
			["cheeses", "cheese_ids", "favorite_cheeses", "favorite_cheese_ids", "greeting_id"]
		{
			assert!(!map.contains_key(key), "{key}");
		}
	}

	assert_eq!(presenter.lookups.get(), 0);
}

#[test]
fn requested_associations_are_reduced_to_ids() {
	let presenter = UserPresenter::default();
	let selection = Selection::new().with_associations(["cheeses", "greeting"]);
	let users = fixtures::users();
	let presented = Pipeline::new(&presenter)
		.present_batch(&users, &selection)
		.expect("Presentation must succeed.");

	assert_eq!(presented[0].get("cheese_ids"), Some(&ids(&fixtures::cheese_ids_owned_by(BOB))));
	assert_eq!(presented[1].get("cheese_ids"), Some(&ids(&[1, 6, 7, 9])));
	assert_eq!(presented[2].get("cheese_ids"), Some(&ids(&[])));
	assert_eq!(
		presented[1].get("greeting_id"),
		Some(&PresentedValue::String("hello jane".to_string()))
	);
}

#[test]
fn lookups_run_once_per_batch() {
	let presenter = UserPresenter::default();
	let selection = Selection::new().with_associations(["favorite_cheeses"]);
	let users = fixtures::users();
	let presented = Pipeline::new(&presenter)
		.present_batch(&users, &selection)
		.expect("Presentation must succeed.");

	assert_eq!(presenter.lookups.get(), 1);
	assert_eq!(presenter.lookup_batch.get(), 3);
	assert_eq!(presented[0].get("favorite_cheese_ids"), Some(&ids(&[2, 3])));
	assert_eq!(presented[1].get("favorite_cheese_ids"), Some(&ids(&[1, 6])));
	assert_eq!(presented[2].get("favorite_cheese_id"), Some(&PresentedValue::Null));

	Pipeline::new(&presenter)
		.present_batch(&users, &selection)
		.expect("Presentation must succeed.");

	assert_eq!(presenter.lookups.get(), 2);
}

#[test]
fn lookup_misses_read_as_null() {
	let presenter = UserPresenter::default();
	let stranger = Row::new(99).with_column("username", "stranger");
	let presented = Pipeline::new(&presenter)
		.present_one(&stranger, &Selection::new().with_associations(["favorite_cheeses"]))
		.expect("Presentation must succeed.");

	assert_eq!(presented.get("favorite_cheese_id"), Some(&PresentedValue::Null));
	assert!(!presented.contains_key("favorite_cheese_ids"));
}

#[test]
fn unknown_accessors_are_configuration_errors() {
	let presenter = CheesePresenter::default();
	let orphan = Row::new(99).with_column("flavor", "mystery");
	let unrequested = Pipeline::new(&presenter)
		.present_one(&orphan, &Selection::new())
		.expect("An unrequested association must be dropped.");

	assert!(!unrequested.contains_key("user_id"));

	let err = Pipeline::new(&presenter)
		.present_one(&orphan, &Selection::new().with_associations(["user"]))
		.expect_err("A requested association without an accessor must be rejected.");

	assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn optional_fields_are_only_computed_when_requested() {
	let presenter = CheesePresenter::default();
	let record = cheese(5);
	let pipeline = Pipeline::new(&presenter);
	let plain =
		pipeline.present_one(&record, &Selection::new()).expect("Presentation must succeed.");

	assert!(!plain.contains_key("flavor_length"));
	assert_eq!(presenter.length_calls.get(), 0);

	let selection = Selection::new().with_fields(["flavor_length"]);
	let first = pipeline.present_one(&record, &selection).expect("Presentation must succeed.");
	let second = pipeline.present_one(&record, &selection).expect("Presentation must succeed.");

	assert_eq!(first, second);
	assert_eq!(first.get("flavor_length"), Some(&int(4)));
	assert_eq!(presenter.length_calls.get(), 2);
}

#[test]
fn temporal_values_are_normalized_at_every_depth() {
	let presenter = UserPresenter::default();
	let users = fixtures::users();
	let presented = Pipeline::new(&presenter)
		.present_one(&users[0], &Selection::new())
		.expect("Presentation must succeed.");

	assert_eq!(
		presented.get("joined_on"),
		Some(&PresentedValue::String("2023-01-15".to_string()))
	);

	let profile =
		presented.get("profile").and_then(PresentedValue::as_map).expect("Profile must be a map.");

	assert_eq!(profile.get("joined_on"), Some(&PresentedValue::String("2023-01-15".to_string())));
	assert_eq!(profile.get("history"), Some(&ids(&[86_400, 1_709_294_400])));

	let json = serde_json::to_value(&presented).expect("Presented maps must serialize.");

	assert_eq!(json["username"], "bob");
	assert_eq!(json["profile"]["history"][0], 86_400);
}

#[test]
fn preload_runs_once_per_batch() {
	let presenter = CheesePresenter::default();
	let cheeses = fixtures::cheeses();
	let pipeline = Pipeline::new(&presenter);
	let presented =
		pipeline.present_batch(&cheeses, &Selection::new()).expect("Presentation must succeed.");

	assert_eq!(presented.len(), cheeses.len());
	assert_eq!(presenter.preloads.get(), 1);

	pipeline.present_one(&cheeses[0], &Selection::new()).expect("Presentation must succeed.");

	assert_eq!(presenter.preloads.get(), 1);
}

#[test]
fn presenters_must_override_present() {
	let err = Pipeline::new(&BarePresenter)
		.present_one(&cheese(1), &Selection::new())
		.expect_err("A bare presenter must be rejected.");

	assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn blank_accessor_names_are_rejected() {
	assert!(matches!(AssociationField::<Row>::accessor("  "), Err(Error::Configuration { .. })));
}

#[test]
fn registry_derives_namespace_and_entity_from_type_paths() {
	let registry = PresenterRegistry::builder()
		.register_type_path("api::v1::CheesePresenter", "cheese-v1")
		.and_then(|builder| builder.register_type_path("UserPresenter", "user"))
		.and_then(|builder| builder.register("v1", "User", "user-v1"))
		.expect("Registration must succeed.")
		.build();

	assert_eq!(registry.get("v1", "Cheese"), Some(&"cheese-v1"));
	assert_eq!(registry.get("root", "User"), Some(&"user"));
	assert_eq!(registry.get("v1", "User"), Some(&"user-v1"));
	assert_eq!(registry.namespaces().collect::<Vec<_>>(), vec!["root", "v1"]);
	assert_eq!(
		registry.entities("v1").collect::<Vec<_>>(),
		vec![("Cheese", &"cheese-v1"), ("User", &"user-v1")]
	);
	assert_eq!(registry.entities("v2").count(), 0);
	assert_eq!(registry.len(), 3);
}

#[test]
fn registry_rejects_duplicates_and_malformed_paths() {
	let duplicate = PresenterRegistry::builder()
		.register("v1", "Cheese", 1)
		.and_then(|builder| builder.register_type_path("api::V1::CheesePresenter", 2));

	assert!(matches!(duplicate, Err(Error::Configuration { .. })));

	for path in ["api::v1::Cheese", "Presenter", ""] {
		let result = PresenterRegistry::builder().register_type_path(path, 0);

		assert!(matches!(result, Err(Error::Configuration { .. })), "{path:?}");
	}
}
