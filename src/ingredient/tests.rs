#[cfg(test)]
mod tests {
    use super::super::mass::{to_grams, MassConverter};
    use super::super::matcher::*;
    use super::super::parser::*;
    use crate::reference::nutrients::{NutrientProfile, NutritionTable};
    use crate::reference::units::UnitTable;

    fn units() -> UnitTable {
        UnitTable::from_entries([
            ("g", 1.0),
            ("kg", 1000.0),
            ("cup", 240.0),
            ("cups", 240.0),
            ("tsp", 5.0),
            ("tbsp", 15.0),
            ("cloves", 5.0),
            ("fluid ounce", 29.57),
            ("fluid ounces", 29.57),
            ("piece", 100.0),
        ])
    }

    fn profile(calories: f64) -> NutrientProfile {
        NutrientProfile::new(calories, 1.0, 2.0, 3.0, 0.5)
    }

    fn table() -> NutritionTable {
        NutritionTable::from_entries([
            ("white rice", profile(130.0)),
            ("chicken breast", profile(165.0)),
            ("chicken", profile(239.0)),
            ("olive oil", profile(884.0)),
            ("eggplant", profile(25.0)),
            ("egg", profile(155.0)),
            ("salt", profile(0.0)),
        ])
    }

    // ---- parser ----

    #[test]
    fn test_leading_number_with_unit() {
        let parsed = parse_line("  2 Cups Cooked White Rice ", &units()).unwrap();
        assert_eq!(parsed.original_text, "2 cups cooked white rice");
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
        assert_eq!(parsed.raw_name, "cooked white rice");
        assert_eq!(parsed.normalized_name, "white rice");
        assert_eq!(parsed.shape, LineShape::LeadingNumber);
    }

    #[test]
    fn test_leading_number_without_unit() {
        // "eggs" is not a unit, the number still counts
        let parsed = parse_line("2 eggs", &units()).unwrap();
        assert_eq!(parsed.quantity, 2.0);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.normalized_name, "eggs");
    }

    #[test]
    fn test_unit_glued_to_number() {
        let parsed = parse_line("150g grilled chicken breast", &units()).unwrap();
        assert_eq!(parsed.quantity, 150.0);
        assert_eq!(parsed.unit.as_deref(), Some("g"));
        assert_eq!(parsed.normalized_name, "grilled chicken breast");
    }

    #[test]
    fn test_two_word_unit() {
        let parsed = parse_line("1.5 fluid ounces olive oil", &units()).unwrap();
        assert_eq!(parsed.quantity, 1.5);
        assert_eq!(parsed.unit.as_deref(), Some("fluid ounces"));
        assert_eq!(parsed.normalized_name, "olive oil");
    }

    #[test]
    fn test_unit_does_not_match_inside_word() {
        let parsed = parse_line("3 cupcakes", &units()).unwrap();
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.quantity, 3.0);
        assert_eq!(parsed.normalized_name, "cupcakes");

        let parsed = parse_line("2 garlic bulbs", &units()).unwrap();
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.normalized_name, "garlic bulbs");
    }

    #[test]
    fn test_line_that_is_only_number_and_unit() {
        let parsed = parse_line("2 cups", &units()).unwrap();
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
        assert_eq!(parsed.raw_name, "");
    }

    #[test]
    fn test_trailing_quantity_with_known_unit() {
        let parsed = parse_line("chicken breast 150 g", &units()).unwrap();
        assert_eq!(parsed.shape, LineShape::TrailingQuantity);
        assert_eq!(parsed.quantity, 150.0);
        assert_eq!(parsed.unit.as_deref(), Some("g"));
        assert_eq!(parsed.normalized_name, "chicken breast");

        let parsed = parse_line("olive oil 2 fluid ounces", &units()).unwrap();
        assert_eq!(parsed.unit.as_deref(), Some("fluid ounces"));
        assert_eq!(parsed.quantity, 2.0);
    }

    #[test]
    fn test_trailing_quantity_with_unknown_unit_falls_back_to_bare_name() {
        let parsed = parse_line("eggs 2 large", &units()).unwrap();
        assert_eq!(parsed.shape, LineShape::BareName);
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.raw_name, "eggs 2 large");
        assert_eq!(parsed.normalized_name, "eggs 2");
    }

    #[test]
    fn test_bare_name() {
        let parsed = parse_line("Salt", &units()).unwrap();
        assert_eq!(parsed.shape, LineShape::BareName);
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, None);
        assert_eq!(parsed.normalized_name, "salt");
    }

    #[test]
    fn test_malformed_numbers_fall_through() {
        for line in ["1/2 cup flour", "1. cup flour", "0 cups rice", "1,5 cups rice"] {
            let parsed = parse_line(line, &units()).unwrap();
            assert_eq!(parsed.shape, LineShape::BareName, "line: {line}");
            assert_eq!(parsed.quantity, 1.0);
        }
    }

    #[test]
    fn test_blank_lines_yield_none() {
        assert!(parse_line("", &units()).is_none());
        assert!(parse_line("   \t ", &units()).is_none());
    }

    #[test]
    fn test_non_empty_lines_always_parse_with_positive_quantity() {
        for line in [
            "2 eggs",
            "x",
            "999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999999 g sugar",
            "tomato 0 g",
            "½ lemon",
            "🍅",
            "3",
        ] {
            let parsed = parse_line(line, &units()).unwrap();
            assert!(parsed.quantity > 0.0 && parsed.quantity.is_finite(), "line: {line}");
            let grams = to_grams(parsed.quantity, parsed.unit.as_deref(), &units());
            assert!(grams > 0.0 && grams.is_finite(), "line: {line}, grams: {grams}");
        }
    }

    #[test]
    fn test_quantity_that_overflows_grams_falls_through() {
        let units = units();
        let line = format!("{} kg rice", "9".repeat(306));
        let parsed = parse_line(&line, &units).unwrap();
        assert_eq!(parsed.shape, LineShape::BareName);
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, None);
        assert!(to_grams(parsed.quantity, None, &units).is_finite());

        let line = format!("rice {} kg", "9".repeat(306));
        assert_eq!(parse_line(&line, &units).unwrap().shape, LineShape::BareName);

        // The same digits fit in grams
        let line = format!("{} g rice", "9".repeat(306));
        assert_eq!(parse_line(&line, &units).unwrap().shape, LineShape::LeadingNumber);
    }

    #[test]
    fn test_parse_line_with_uses_converter_factors() {
        let units = units();
        let line = format!("{} eggs", "9".repeat(307));
        // 1e307 pieces at 100 g each overflow; the bare-name reading does not
        let parsed = parse_line_with(&line, &MassConverter::new(&units)).unwrap();
        assert_eq!(parsed.shape, LineShape::BareName);

        let tiny = UnitTable::from_entries([("piece", 1.0)]);
        let parsed = parse_line_with(&line, &MassConverter::new(&tiny)).unwrap();
        assert_eq!(parsed.shape, LineShape::LeadingNumber);
    }

    #[test]
    fn test_interior_whitespace_is_collapsed() {
        let parsed = parse_line("1   fluid\tounce   olive  oil", &units()).unwrap();
        assert_eq!(parsed.unit.as_deref(), Some("fluid ounce"));
        assert_eq!(parsed.normalized_name, "olive oil");
    }

    #[test]
    fn test_shape_extract_is_independent() {
        let units = units();
        assert!(LineShape::LeadingNumber.extract("salt", &units).is_none());
        assert!(LineShape::TrailingQuantity.extract("salt 1 pinch", &units).is_none());
        assert_eq!(
            LineShape::TrailingQuantity.extract("salt 1 tsp", &units),
            Some(LineFields {
                quantity: 1.0,
                unit: Some("tsp".to_string()),
                raw_name: "salt".to_string(),
            })
        );
        assert!(LineShape::BareName.extract("anything", &units).is_some());
    }

    // ---- matcher ----

    #[test]
    fn test_exact_tier() {
        let result = match_ingredient("salt", &table());
        assert_eq!(result.canonical_name(), Some("salt"));
        assert!(matches!(result, MatchResult::Found { tier: MatchTier::Exact, .. }));
    }

    #[test]
    fn test_substring_tier_name_contains_key() {
        let result = match_ingredient("grilled chicken breast", &table());
        assert_eq!(result.canonical_name(), Some("chicken breast"));
        assert!(matches!(result, MatchResult::Found { tier: MatchTier::Substring, .. }));
    }

    #[test]
    fn test_substring_tier_key_contains_name() {
        let result = match_ingredient("rice", &table());
        assert_eq!(result.canonical_name(), Some("white rice"));
    }

    #[test]
    fn test_substring_tier_follows_table_order() {
        // "eggs" contains "egg", but "eggplant" is listed first and does
        // not relate to "eggs" either way, so "egg" wins
        assert_eq!(match_ingredient("eggs", &table()).canonical_name(), Some("egg"));
        // "eggplant" sits before "egg", so it is chosen for its own name
        assert_eq!(
            match_ingredient("roasted eggplant", &table()).canonical_name(),
            Some("eggplant")
        );

        let reordered = NutritionTable::from_entries([
            ("chicken", profile(239.0)),
            ("chicken breast", profile(165.0)),
        ]);
        assert_eq!(
            match_ingredient("grilled chicken breast", &reordered).canonical_name(),
            Some("chicken")
        );
    }

    #[test]
    fn test_word_tier() {
        let result = match_ingredient("extra virgin olive", &table());
        // "extra virgin olive" vs "olive oil": no containment either way
        assert_eq!(result.canonical_name(), Some("olive oil"));
        assert!(matches!(result, MatchResult::Found { tier: MatchTier::Word, .. }));
    }

    #[test]
    fn test_word_tier_skips_short_words() {
        // "oil" has three characters, not more than three
        assert_eq!(match_ingredient("hot oil drizzle", &table()), MatchResult::NotFound);

        let table = table();
        let matcher = IngredientMatcher::with_min_word_length(&table, 2);
        assert_eq!(matcher.find("hot oil drizzle").canonical_name(), Some("olive oil"));
    }

    #[test]
    fn test_word_tier_first_word_wins() {
        // Neither name contains a key nor is contained in one, so the word
        // tier decides and the leftmost qualifying word picks the key
        assert_eq!(
            match_ingredient("olive breast", &table()).canonical_name(),
            Some("olive oil")
        );
        assert_eq!(
            match_ingredient("breast olive", &table()).canonical_name(),
            Some("chicken breast")
        );
    }

    #[test]
    fn test_substring_tier_beats_word_tier() {
        // "salty chicken" contains the key "chicken", which is checked
        // before any word lookup happens
        let result = match_ingredient("salty chicken", &table());
        assert_eq!(result.canonical_name(), Some("chicken"));
        assert!(matches!(result, MatchResult::Found { tier: MatchTier::Substring, .. }));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(match_ingredient("xyzabc unknownfood", &table()), MatchResult::NotFound);
    }

    #[test]
    fn test_empty_name_never_matches() {
        assert_eq!(match_ingredient("", &table()), MatchResult::NotFound);
    }

    #[test]
    fn test_matching_is_deterministic() {
        let table = table();
        let first = match_ingredient("grilled chicken breast", &table);
        for _ in 0..10 {
            assert_eq!(match_ingredient("grilled chicken breast", &table), first);
        }
    }
}
