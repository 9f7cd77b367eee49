//! A small cheese shop: three users and the twelve cheeses they own.
//!
//! Bob owns cheeses 2, 3, 4, 5, 8, 10, 11 and 12. Jane owns the rest. Will owns nothing.

use time::macros::date;

use prism_domain::RecordId;
use prism_presenter::AssociationValue;

use crate::Row;

pub const BOB: i64 = 1;
pub const JANE: i64 = 2;
pub const WILL: i64 = 3;

const CHEESES: [(i64, i64, &str); 12] = [
	(1, JANE, "colby jack"),
	(2, BOB, "swiss"),
	(3, BOB, "cheddar"),
	(4, BOB, "gouda"),
	(5, BOB, "brie"),
	(6, JANE, "manchego"),
	(7, JANE, "parmesan"),
	(8, BOB, "roquefort"),
	(9, JANE, "feta"),
	(10, BOB, "gruyere"),
	(11, BOB, "havarti"),
	(12, BOB, "mozzarella"),
];

/// Cheese `n` was last updated on March `n`, 2024, so `updated_at:desc` lists 12 down to 1.
pub fn cheeses() -> Vec<Row> {
	CHEESES
		.iter()
		.map(|(id, owner, flavor)| {
			Row::new(*id)
				.with_column("user_id", *owner)
				.with_column("flavor", *flavor)
				.with_column("updated_at", format!("2024-03-{id:02}T12:00:00Z"))
				.with_relation("user", AssociationValue::record(RecordId(*owner)))
		})
		.collect()
}

pub fn users() -> Vec<Row> {
	[
		(BOB, "bob", date!(2023 - 01 - 15)),
		(JANE, "jane", date!(2023 - 06 - 01)),
		(WILL, "will", date!(2024 - 02 - 29)),
	]
	.into_iter()
	.map(|(id, username, joined_on)| {
		let owned = cheese_ids_owned_by(id).into_iter().map(RecordId);

		Row::new(id)
			.with_column("username", username)
			.with_value("joined_on", joined_on)
			.with_relation("cheeses", AssociationValue::records(owned))
	})
	.collect()
}

/// Ids of the cheeses `user` owns, in id order.
pub fn cheese_ids_owned_by(user: i64) -> Vec<i64> {
	CHEESES.iter().filter(|(_, owner, _)| *owner == user).map(|(id, _, _)| *id).collect()
}
