//! Map loading through the file-based entry point, including the error
//! surface for missing files and malformed map text.

use sokoterm::{GameMap, MapError, SokoError, UndoQuota};
use std::fs;

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rectangular.map");
    fs::write(
        &path,
        "233\n######\n#A..@#\n#...@#\n#....#\n#.a..#\n#..a.#\n######\n",
    )
    .unwrap();

    let map = GameMap::from_file(&path).unwrap();

    assert_eq!(map.width(), 6);
    assert_eq!(map.height(), 7);
    assert_eq!(map.undo_quota(), UndoQuota::Limited(233));
}

#[test]
fn missing_file_surfaces_as_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.map");

    let err = GameMap::from_file(&path).unwrap_err();

    assert!(matches!(err, SokoError::Io(_)));
}

#[test]
fn malformed_file_surfaces_as_map_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.map");
    fs::write(&path, "-5\n####\n#Aa#\n#.@#\n####\n").unwrap();

    let err = GameMap::from_file(&path).unwrap_err();

    assert!(matches!(
        err,
        SokoError::Map(MapError::NegativeUndoQuota(-5))
    ));
}

#[test]
fn bundled_maps_parse() {
    for name in ["two_players.map", "classic.map"] {
        let text = fs::read_to_string(format!("maps/{}", name)).unwrap();
        let map = GameMap::parse(&text)
            .unwrap_or_else(|e| panic!("bundled map {} failed to parse: {}", name, e));
        assert!(map.player_count() >= 1);
    }
}
