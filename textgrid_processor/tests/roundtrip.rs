//! 解析与生成的端到端往返测试。

use textgrid_helper_core::{Interval, IntervalTier, Point, PointTier, Textgrid, Tier};
use textgrid_processor::{Dialect, detect_dialect, generate_textgrid, parse_textgrid};

const SHORT_FIXTURE: &str = "File type = \"ooTextFile short\"\n\"TextGrid\"\n\n0\n2.5\n<exists>\n2\n\"IntervalTier\"\n\"words\"\n0\n2.5\n3\n0\n1\n\"hello\"\n1\n1.5\n\"\"\n1.5\n2.5\n\"world\"\n\"TextTier\"\n\"events\"\n0\n2.5\n1\n2\n\"click\"\n";

const FULL_FIXTURE: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 2.5
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 2.5
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 1
            text = "hello"
        intervals [2]:
            xmin = 1
            xmax = 1.5
            text = ""
        intervals [3]:
            xmin = 1.5
            xmax = 2.5
            text = "world"
    item [2]:
        class = "TextTier"
        name = "events"
        xmin = 0
        xmax = 2.5
        points: size = 1
        points [1]:
            number = 2
            mark = "click"
"#;

fn interval(start: f64, end: f64, label: &str) -> Interval {
    Interval::new(start, end, label).unwrap()
}

fn build_textgrid() -> Textgrid {
    let mut textgrid = Textgrid::new();
    textgrid
        .add_tier(
            Tier::Interval(
                IntervalTier::new(
                    "words",
                    vec![interval(0.0, 1.25, "hello"), interval(1.25, 2.0, "world")],
                    Some(0.0),
                    Some(4.0),
                )
                .unwrap(),
            ),
            None,
        )
        .unwrap();
    textgrid
        .add_tier(
            Tier::Interval(
                IntervalTier::new(
                    "phones",
                    vec![
                        interval(0.0, 0.5, "h"),
                        interval(0.5, 1.25, "ə"),
                        interval(2.5, 3.0, "w"),
                    ],
                    Some(0.0),
                    Some(4.0),
                )
                .unwrap(),
            ),
            None,
        )
        .unwrap();
    textgrid
        .add_tier(
            Tier::Point(
                PointTier::new(
                    "events",
                    vec![Point::new(0.75, "peak"), Point::new(3.5, "click")],
                    Some(0.0),
                    Some(4.0),
                )
                .unwrap(),
            ),
            None,
        )
        .unwrap();
    textgrid
}

#[test]
fn short_round_trip_preserves_nonempty_labels() {
    let original = build_textgrid();
    let serialized = generate_textgrid(&original).unwrap();
    let parsed = parse_textgrid(&serialized).unwrap();
    assert!(
        original.approx_eq(&parsed),
        "往返后不相等:\n{serialized}"
    );
}

#[test]
fn round_trip_is_idempotent_after_first_parse() {
    let first = parse_textgrid(SHORT_FIXTURE).unwrap();
    let regenerated = generate_textgrid(&first).unwrap();
    let second = parse_textgrid(&regenerated).unwrap();
    assert!(first.approx_eq(&second));
}

#[test]
fn generated_text_is_detected_as_short() {
    let serialized = generate_textgrid(&build_textgrid()).unwrap();
    assert_eq!(detect_dialect(&serialized), Dialect::Short);
    assert_eq!(detect_dialect(FULL_FIXTURE), Dialect::Full);
}

#[test]
fn both_dialects_recover_identical_structure() {
    let from_short = parse_textgrid(SHORT_FIXTURE).unwrap();
    let from_full = parse_textgrid(FULL_FIXTURE).unwrap();
    assert!(from_short.approx_eq(&from_full));
    assert_eq!(from_short.tier_names(), ["words", "events"]);
}

#[test]
fn empty_labels_are_stripped_on_parse() {
    let parsed = parse_textgrid(SHORT_FIXTURE).unwrap();
    let Some(Tier::Interval(words)) = parsed.tier("words") else {
        panic!("缺少 words 层级");
    };
    assert_eq!(words.entries().len(), 2);
    assert!(words.entries().iter().all(|e| !e.label.is_empty()));
}

#[test]
fn crlf_line_endings_are_normalized() {
    let crlf_fixture = SHORT_FIXTURE.replace('\n', "\r\n");
    let parsed = parse_textgrid(&crlf_fixture).unwrap();
    let reference = parse_textgrid(SHORT_FIXTURE).unwrap();
    assert!(parsed.approx_eq(&reference));
}
