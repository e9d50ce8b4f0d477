use javagraph::normalizer::{
    classify_and_wrap, mask_literals, normalize, unmask_literals, Strictness, WrapStrategy,
};

#[test]
fn always_returns_a_candidate_with_statement_fallback_last() {
    for input in ["%%%", "foo bar", "x+1", "<<<>>>"] {
        let candidates = classify_and_wrap(input);
        assert!(!candidates.is_empty(), "no candidate for {:?}", input);
        let last = candidates.last().unwrap();
        assert!(
            last.source.contains("snippetMethod"),
            "fallback for {:?} should be a statement wrap, got {:?}",
            input,
            last.source
        );
        assert!(last.source.contains(input.trim()));
    }
}

#[test]
fn empty_fragment_wraps_as_empty_type() {
    for input in ["", "   ", "\n\t\n"] {
        let candidates = classify_and_wrap(input);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].strategy, WrapStrategy::MinEmpty);
        assert_eq!(candidates[0].source, "public class Snippet {}");
    }
}

#[test]
fn masking_round_trips_literal_content() {
    let input = r#"String s = "a(b\"c"; char c = '{'; int x = 1;"#;
    for strictness in [Strictness::Minimal, Strictness::Aggressive] {
        let normalized = normalize(input, strictness);
        assert!(
            normalized.contains(r#""a(b\"c""#),
            "string literal corrupted: {:?}",
            normalized
        );
        assert!(normalized.contains("'{'"), "char literal corrupted: {:?}", normalized);
        assert!(!normalized.contains("__STR"), "placeholder leaked: {:?}", normalized);
    }
}

#[test]
fn unterminated_literal_is_masked_to_end_of_input() {
    let input = r#"int x = 0; String s = "never closed"#;
    let masked = mask_literals(input);
    assert_eq!(masked.literals.len(), 1);
    assert!(masked.text.contains("__STR0__"));
    assert_eq!(unmask_literals(&masked.text, &masked.literals), input);
}

#[test]
fn masking_literal_free_text_is_identity() {
    let input = "int x = 5; // no literals here";
    let masked = mask_literals(input);
    assert_eq!(masked.text, input);
    assert!(masked.literals.is_empty());
}

#[test]
fn type_declaration_is_first_and_unwrapped() {
    let input = "public class Foo { int x; }";
    let candidates = classify_and_wrap(input);
    assert_eq!(candidates[0].strategy, WrapStrategy::MinType);
    assert_eq!(candidates[0].source, input);
    assert_eq!(candidates.last().unwrap().strategy, WrapStrategy::MinDefault);
}

#[test]
fn statement_fragment_wraps_in_method_body() {
    let candidates = classify_and_wrap("if (x > 0) { return x; }");
    assert_eq!(candidates[0].strategy, WrapStrategy::MinStatement);
    assert!(candidates[0].source.contains("snippetMethod"));
    assert!(
        candidates.iter().all(|c| c.strategy != WrapStrategy::MinMember),
        "a statement must not be offered as a bare member"
    );
}

#[test]
fn member_fragment_wraps_in_type_body() {
    let candidates = classify_and_wrap("int x = 5;");
    assert_eq!(candidates[0].strategy, WrapStrategy::MinMember);
    assert!(candidates[0].source.starts_with("public class Snippet {"));
    assert!(!candidates[0].source.contains("snippetMethod"));
}

#[test]
fn aggressive_normalization_recovers_dropped_whitespace() {
    let candidates = classify_and_wrap("publicclass Foo { int x; }");
    assert_eq!(candidates[0].strategy, WrapStrategy::AggType);
    assert_eq!(candidates[0].source, "public class Foo { int x; }");
}

#[test]
fn leading_comments_are_skipped_for_matching_but_kept_in_the_wrap() {
    let candidates = classify_and_wrap("// provenance header\nint x = 5;");
    assert_eq!(candidates[0].strategy, WrapStrategy::MinMember);
    assert!(candidates[0].source.contains("// provenance header"));
}

#[test]
fn normalization_spaces_structural_tokens() {
    assert_eq!(normalize("foo(bar);baz();", Strictness::Minimal), "foo (bar); baz ();");
    assert_eq!(normalize("a;;b", Strictness::Minimal), "a; ; b");
    assert_eq!(normalize("x\t\t  y", Strictness::Minimal), "x y");
    // Newlines survive; only horizontal whitespace collapses
    assert_eq!(normalize("a;\nb;", Strictness::Minimal), "a;\nb;");
}

#[test]
fn literal_contents_never_gain_spacing() {
    let normalized = normalize(r#"System.out.println("a(b");"#, Strictness::Minimal);
    assert_eq!(normalized, r#"System.out.println ("a(b");"#);
}
