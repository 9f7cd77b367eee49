//! English singularization for association field names.
//!
//! Only the last `_`-separated word is inflected, so `line_items` becomes `line_item`.

const UNCOUNTABLE: &[&str] = &[
	"equipment",
	"fish",
	"information",
	"jeans",
	"money",
	"news",
	"police",
	"rice",
	"series",
	"sheep",
	"species",
];

const IRREGULAR: &[(&str, &str)] = &[
	("aliases", "alias"),
	("buses", "bus"),
	("children", "child"),
	("feet", "foot"),
	("geese", "goose"),
	("knives", "knife"),
	("lives", "life"),
	("men", "man"),
	("mice", "mouse"),
	("movies", "movie"),
	("oxen", "ox"),
	("people", "person"),
	("shoes", "shoe"),
	("teeth", "tooth"),
	("wives", "wife"),
	("women", "woman"),
];

// Checked in order; the first matching suffix wins.
const SUFFIX_RULES: &[(&str, &str)] = &[
	("sses", "ss"),
	("zzes", "z"),
	("xes", "x"),
	("ches", "ch"),
	("shes", "sh"),
	("tuses", "tus"),
	("oes", "o"),
	("lves", "lf"),
	("rves", "rf"),
];

const KEEP_ENDINGS: &[&str] = &["ss", "us", "is"];

pub fn singularize(word: &str) -> String {
	let (head, last) = match word.rfind('_') {
		Some(index) => word.split_at(index + 1),
		None => ("", word),
	};

	format!("{head}{}", singularize_word(last))
}

fn singularize_word(word: &str) -> String {
	let lower = word.to_ascii_lowercase();

	if UNCOUNTABLE.contains(&lower.as_str()) {
		return lower;
	}
	if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
		return singular.to_string();
	}
	if let Some(stem) = lower.strip_suffix("ies")
		&& stem.chars().last().is_some_and(|last| !"aeiou".contains(last))
	{
		return format!("{stem}y");
	}

	for (suffix, replacement) in SUFFIX_RULES {
		if let Some(stem) = lower.strip_suffix(suffix) {
			return format!("{stem}{replacement}");
		}
	}

	if KEEP_ENDINGS.iter().any(|ending| lower.ends_with(ending)) {
		return lower;
	}

	match lower.strip_suffix('s') {
		Some(stem) if !stem.is_empty() => stem.to_string(),
		_ => lower,
	}
}
