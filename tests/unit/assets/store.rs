use super::*;

fn tiny_png() -> Vec<u8> {
    // Encode a 2x2 image in-process so the fixture can't rot.
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

#[test]
fn missing_keys_fall_back_without_error() {
    let store = TextureStore::new();
    assert!(store.get("nodes/week-locked.png").is_none());

    let blank = store.get_or_blank("nodes/week-locked.png");
    assert_eq!((blank.width, blank.height), (1, 1));
    assert_eq!(blank.data, vec![255, 255, 255, 255]);
}

#[test]
fn png_decode_registers_premultiplied_pixels() {
    let mut store = TextureStore::new();
    assert!(store.insert_png("nodes/week-unlocked.png", &tiny_png()));
    let t = store.get("nodes/week-unlocked.png").unwrap();
    assert_eq!((t.width, t.height), (2, 2));
    assert_eq!(&t.data[..4], &[10, 20, 30, 255]);
}

#[test]
fn bad_bytes_are_absorbed() {
    let mut store = TextureStore::new();
    assert!(!store.insert_png("nodes/broken.png", b"not a png"));
    assert!(store.get("nodes/broken.png").is_none());
    assert!(store.is_empty());
}

#[test]
fn frame_keys_require_loaded_frames() {
    let mut store = TextureStore::new();
    assert!(store.frame_keys("avatar/walk", 6).is_empty());

    store.insert("avatar/walk/frame1.png", Texture::blank());
    store.insert("avatar/walk/frame3.png", Texture::blank());
    assert_eq!(
        store.frame_keys("avatar/walk", 6),
        vec!["avatar/walk/frame1.png", "avatar/walk/frame3.png"]
    );
}

#[test]
fn node_texture_key_prefers_category_art_for_active_states() {
    let mut store = TextureStore::new();
    store.insert("nodes/task-movement.png", Texture::blank());
    store.insert("nodes/day-unlocked.png", Texture::blank());
    store.insert("nodes/day-locked.png", Texture::blank());

    // Active task: category art wins.
    assert_eq!(
        store.node_texture_key(
            NodeKind::Task,
            NodeState::InProgress,
            Some(TaskCategory::Movement)
        ),
        Some("nodes/task-movement.png".to_string())
    );
    // Locked task: falls through to the state table.
    assert_eq!(
        store.node_texture_key(
            NodeKind::Task,
            NodeState::Locked,
            Some(TaskCategory::Movement)
        ),
        Some("nodes/day-locked.png".to_string())
    );
    // Skipped reuses the locked art.
    assert_eq!(
        store.node_texture_key(NodeKind::Day, NodeState::Skipped, None),
        Some("nodes/day-locked.png".to_string())
    );
    // Nothing loaded for weeks.
    assert_eq!(
        store.node_texture_key(NodeKind::Week, NodeState::Unlocked, None),
        None
    );
}
