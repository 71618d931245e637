use akkadian::{AnalysisError, Analyzer, Case, Gender, Number, Weight};

fn syllables(word: &str) -> Vec<String> {
    Analyzer::new()
        .syllabify(word)
        .unwrap()
        .iter()
        .map(|s| s.text())
        .collect()
}

fn stress(word: &str) -> Vec<String> {
    Analyzer::new().render_stress(word).unwrap()
}

fn forms(noun: &str, gender: Gender) -> Vec<(String, Case, Number)> {
    let mut forms: Vec<_> = Analyzer::new()
        .decline_noun(noun, gender)
        .unwrap()
        .iter()
        .map(|f| (f.form.clone(), f.case, f.number))
        .collect();
    forms.sort();
    forms
}

fn expected(pairs: &[(&str, Case, Number)]) -> Vec<(String, Case, Number)> {
    let mut forms: Vec<_> = pairs
        .iter()
        .map(|&(f, c, n)| (f.to_string(), c, n))
        .collect();
    forms.sort();
    forms
}

#[test]
fn test_syllabification() {
    assert_eq!(syllables("balāṭī"), ["ba", "lā", "ṭī"]);
    assert_eq!(syllables("elûm"), ["e", "lûm"]);
    assert_eq!(syllables("ṣabat"), ["ṣa", "bat"]);
    assert_eq!(syllables("īteneppuš"), ["ī", "te", "nep", "puš"]);
    assert_eq!(syllables("narkabtum"), ["nar", "kab", "tum"]);
    assert_eq!(syllables("epištašu"), ["e", "piš", "ta", "šu"]);
    assert_eq!(syllables("kiam"), ["ki", "am"]);
    assert_eq!(syllables("kiʾam"), ["ki", "ʾam"]);
    assert_eq!(syllables("ibnû"), ["ib", "nû"]);
}

#[test]
fn test_stress() {
    assert_eq!(stress("ibnû"), ["ib", "[nû]"]);
    assert_eq!(stress("idūk"), ["i", "[dūk]"]);
    assert_eq!(stress("iparras"), ["i", "[par]", "ras"]);
    assert_eq!(stress("nidittum"), ["ni", "[dit]", "tum"]);
    assert_eq!(stress("idūkū"), ["i", "[dū]", "kū"]);
    assert_eq!(stress("tēteneppušā"), ["tē", "te", "[nep]", "pu", "šā"]);
    assert_eq!(stress("itâršum"), ["i", "[târ]", "šum"]);
    assert_eq!(stress("napištašunu"), ["na", "[piš]", "ta", "šu", "nu"]);
    assert_eq!(stress("zikarum"), ["[zi]", "ka", "rum"]);
    assert_eq!(stress("šunu"), ["[šu]", "nu"]);
    assert_eq!(stress("ilū"), ["[i]", "lū"]);
}

#[test]
fn test_stress_marks_exactly_one_syllable() {
    let analyzer = Analyzer::new();
    let stressed = analyzer.stress("iparras").unwrap();
    let marks: Vec<bool> = stressed.iter().map(|s| s.stressed).collect();
    assert_eq!(marks, [false, true, false]);
    assert_eq!(stressed[1].weight, Weight::Heavy);
}

#[test]
fn test_weights() {
    let weights: Vec<Weight> = Analyzer::new()
        .weigh("itâršum")
        .unwrap()
        .iter()
        .map(|w| w.weight)
        .collect();
    assert_eq!(weights, [Weight::Light, Weight::Ultraheavy, Weight::Heavy]);
}

#[test]
fn test_cv_pattern() {
    let analyzer = Analyzer::new();
    assert_eq!(analyzer.render_cv_pattern("iparras").unwrap(), "V₁C₁V₂C₂C₂V₂C₃");
    let pattern = analyzer.cv_pattern("ilātum").unwrap();
    assert_eq!(pattern.len(), 6);
    assert_eq!(pattern[2].letter, 'a');
    assert_eq!(pattern[2].index, 2);
}

#[test]
fn test_get_stem() {
    let analyzer = Analyzer::new();
    assert_eq!(analyzer.get_stem("ilum", Gender::Masculine).unwrap(), "il");
    assert_eq!(analyzer.get_stem("šarrū", Gender::Masculine).unwrap(), "šarr");
    assert_eq!(analyzer.get_stem("ilātum", Gender::Feminine).unwrap(), "ilt");
    assert_eq!(analyzer.get_stem("bēltān", Gender::Feminine).unwrap(), "bēlt");
    assert_eq!(analyzer.get_stem("bīnītum", Gender::Feminine).unwrap(), "bīnt");
    assert_eq!(analyzer.get_stem("bīnītim", Gender::Feminine).unwrap(), "bīnt");
    let paradigm = analyzer.decline_noun("bīnītim", Gender::Feminine).unwrap();
    assert_eq!(paradigm.get(Number::Plural, Case::Oblique).unwrap().form, "bīnītim");
    // Feminine without the `t` marker falls back to the masculine endings.
    assert_eq!(analyzer.get_stem("nārum", Gender::Feminine).unwrap(), "nār");
}

#[test]
fn test_unknown_ending() {
    let analyzer = Analyzer::new();
    let err = analyzer.get_stem("šarru", Gender::Masculine).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::UnknownEndingPattern { ref noun, gender: Gender::Masculine } if noun == "šarru"
    ));
    assert!(analyzer.decline_noun("šarru", Gender::Masculine).is_err());
    assert!(analyzer.get_bound_form("šarru", Gender::Masculine).is_err());
}

#[test]
fn test_decline_noun() {
    use Case::*;
    use Number::*;

    assert_eq!(
        forms("ilum", Gender::Masculine),
        expected(&[
            ("ilim", Genitive, Singular),
            ("ilum", Nominative, Singular),
            ("ilam", Accusative, Singular),
            ("ilīn", Oblique, Dual),
            ("ilān", Nominative, Dual),
            ("ilī", Oblique, Plural),
            ("ilū", Nominative, Plural),
        ])
    );

    assert_eq!(
        forms("šarrum", Gender::Masculine),
        expected(&[
            ("šarrim", Genitive, Singular),
            ("šarrum", Nominative, Singular),
            ("šarram", Accusative, Singular),
            ("šarrīn", Oblique, Dual),
            ("šarrān", Nominative, Dual),
            ("šarrī", Oblique, Plural),
            ("šarrū", Nominative, Plural),
        ])
    );

    assert_eq!(
        forms("iltum", Gender::Feminine),
        expected(&[
            ("iltim", Genitive, Singular),
            ("iltum", Nominative, Singular),
            ("iltam", Accusative, Singular),
            ("iltīn", Oblique, Dual),
            ("iltān", Nominative, Dual),
            ("ilātim", Oblique, Plural),
            ("ilātum", Nominative, Plural),
        ])
    );

    assert_eq!(
        forms("šarratum", Gender::Feminine),
        expected(&[
            ("šarratim", Genitive, Singular),
            ("šarratum", Nominative, Singular),
            ("šarratam", Accusative, Singular),
            ("šarratīn", Oblique, Dual),
            ("šarratān", Nominative, Dual),
            ("šarrātim", Oblique, Plural),
            ("šarrātum", Nominative, Plural),
        ])
    );

    assert_eq!(
        forms("nārum", Gender::Feminine),
        expected(&[
            ("nārim", Genitive, Singular),
            ("nārum", Nominative, Singular),
            ("nāram", Accusative, Singular),
            ("nārīn", Oblique, Dual),
            ("nārān", Nominative, Dual),
            ("nārātim", Oblique, Plural),
            ("nārātum", Nominative, Plural),
        ])
    );
}

#[test]
fn test_paradigm_slot_lookup() {
    let paradigm = Analyzer::new().decline_noun("ilum", Gender::Masculine).unwrap();
    assert_eq!(paradigm.len(), 7);
    assert_eq!(paradigm.get(Number::Singular, Case::Genitive).unwrap().form, "ilim");
    assert_eq!(paradigm.get(Number::Plural, Case::Nominative).unwrap().form, "ilū");
    assert!(paradigm.get(Number::Dual, Case::Genitive).is_none());
}

#[test]
fn test_bound_form() {
    let analyzer = Analyzer::new();
    assert_eq!(
        analyzer.get_bound_form("aḫum", Gender::Masculine).unwrap().as_deref(),
        Some("aḫi")
    );
    assert_eq!(analyzer.get_bound_form("awīlum", Gender::Masculine).unwrap(), None);
}

#[test]
fn test_input_errors() {
    let analyzer = Analyzer::new();
    assert!(matches!(analyzer.syllabify(""), Err(AnalysisError::EmptyWord)));
    assert!(matches!(
        analyzer.syllabify("šarrox"),
        Err(AnalysisError::UnknownCharacter('o'))
    ));
    assert!(matches!(
        analyzer.stress("k"),
        Err(AnalysisError::MalformedWord { position: 0, .. })
    ));
    assert!(matches!(
        analyzer.get_stem("ilu m", Gender::Masculine),
        Err(AnalysisError::UnknownCharacter(' '))
    ));
}
