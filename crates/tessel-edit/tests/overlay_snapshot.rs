use proptest::prelude::*;
use tessel_chunk::{Chunk, ChunkCoord, ChunkDims};
use tessel_edit::{BlockOverlay, OverlaySnapshot};

#[test]
fn snapshot_survives_toml() {
    let mut o = BlockOverlay::new(ChunkDims::default());
    o.set(-5, 64, 12, 3);
    o.set(100, 0, -100, 0);
    let text = OverlaySnapshot::from_overlay(&o).to_toml_string().unwrap();
    let snap = OverlaySnapshot::from_toml_str(&text).unwrap();
    let mut restored = BlockOverlay::new(ChunkDims::default());
    assert_eq!(snap.apply_to(&mut restored), 2);
    assert_eq!(restored.get(-5, 64, 12), Some(3));
    assert_eq!(restored.get(100, 0, -100), Some(0));
}

#[test]
fn malformed_keys_are_ignored() {
    let snap = OverlaySnapshot::from_toml_str(
        r#"
        [edits]
        "1|2|3" = 4
        "1|2" = 5
        "x|y|z" = 6
        "#,
    )
    .unwrap();
    let mut o = BlockOverlay::new(ChunkDims::default());
    assert_eq!(snap.apply_to(&mut o), 1);
    assert_eq!(o.len(), 1);
    assert_eq!(o.get(1, 2, 3), Some(4));
}

#[test]
fn save_and_load_file() {
    let path = std::env::temp_dir().join(format!("tessel-overlay-{}.toml", std::process::id()));
    let mut o = BlockOverlay::new(ChunkDims::default());
    o.set(7, 8, 9, 2);
    OverlaySnapshot::from_overlay(&o).save(&path).unwrap();
    let snap = OverlaySnapshot::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(snap.edits.get("7|8|9"), Some(&2));
}

proptest! {
    #[test]
    fn edits_before_load_apply_on_load(
        edits in prop::collection::vec(((-40i32..40, -10i32..40, -40i32..40), 0u16..6), 0..64)
    ) {
        let dims = ChunkDims::new(8, 16);
        let mut o = BlockOverlay::new(dims);
        for ((x, y, z), id) in &edits {
            o.set(*x, *y, *z, *id);
        }
        let coord = ChunkCoord::new(0, 0, 0);
        let mut chunk = Chunk::new(coord, 0, dims);
        chunk.fill(1);
        o.apply_to_chunk(&mut chunk);
        for ((x, y, z), _) in &edits {
            if let Some(b) = chunk.get_world(*x, *y, *z) {
                prop_assert_eq!(Some(b), o.get(*x, *y, *z));
            }
        }
        prop_assert_eq!(o.snapshot_for_chunk(coord).len(), o.iter().filter(|((x, y, z), _)| chunk.contains_world(*x, *y, *z)).count());
    }
}
