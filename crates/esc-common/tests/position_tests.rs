use super::*;

#[test]
fn test_line_map_handles_mixed_line_endings() {
    let source = "a\nbb\r\nccc\rd";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 4);
    assert_eq!(map.line_start(1), Some(2));
    assert_eq!(map.line_start(2), Some(6));
    assert_eq!(map.line_start(3), Some(10));
}

#[test]
fn test_offset_to_position() {
    let source = "let x = 1;\nfoo();\n";
    let map = LineMap::build(source);
    assert_eq!(map.offset_to_position(0, source), Position::new(0, 0));
    assert_eq!(map.offset_to_position(11, source), Position::new(1, 0));
    assert_eq!(map.offset_to_position(14, source), Position::new(1, 3));
    assert_eq!(map.line_of(13), 1);
}
