//! End-to-end rendering: every catalog piece, deterministic output.

use sha2::{Digest as _, Sha256};

use hashart::{pieces, AuxProps, Canvas, Digest};

fn digest_of(seed: &str) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.finalize().into()
}

#[test]
fn known_seed_hashes_to_known_digest() {
    let digest = digest_of("Hello, World!");
    assert_eq!(
        &digest[..8],
        &[0xdf, 0xfd, 0x60, 0x21, 0xbb, 0x2b, 0xd5, 0xb0]
    );
}

#[test]
fn circles_template_normalizes_deterministically() {
    let digest = digest_of("Hello, World!");
    let piece = pieces::lookup("circles").unwrap();
    let first = hashart::explain(piece.as_ref(), &digest);
    let second = hashart::explain(piece.as_ref(), &digest);
    assert_eq!(first, second);
    assert_eq!(first[0].name, "x1");
    // x1 reads bytes dffd: 0xdf/256 + 0xfd/256^2
    let expected = 0xdf as f64 / 256.0 + 0xfd as f64 / 65536.0;
    assert_eq!(first[0].normalized, expected);
}

#[test_log::test]
fn every_piece_renders_identically_twice() {
    let digest = digest_of("determinism");
    let aux = AuxProps::new();

    for name in pieces::names() {
        let piece = pieces::lookup(name).unwrap();

        let mut first = Canvas::new(132, 99);
        hashart::render(piece.as_ref(), &mut first, &digest, &aux)
            .unwrap_or_else(|e| panic!("{name} failed: {e}"));

        let mut second = Canvas::new(132, 99);
        hashart::render(piece.as_ref(), &mut second, &digest, &aux).unwrap();

        assert_eq!(first.data, second.data, "{name} is not deterministic");
    }
}

#[test]
fn different_seeds_change_at_least_one_piece_output() {
    let aux = AuxProps::new();
    let piece = pieces::lookup("circles").unwrap();

    let mut a = Canvas::new(132, 132);
    hashart::render(piece.as_ref(), &mut a, &digest_of("seed-a"), &aux).unwrap();
    let mut b = Canvas::new(132, 132);
    hashart::render(piece.as_ref(), &mut b, &digest_of("seed-b"), &aux).unwrap();

    assert_ne!(a.data, b.data);
}

#[test]
fn render_starts_from_a_clean_canvas() {
    let digest = digest_of("clean slate");
    let aux = AuxProps::new();
    let piece = pieces::lookup("divisions").unwrap();

    let mut dirty = Canvas::new(66, 66);
    dirty.clear(hashart::Rgb::BLACK);
    hashart::render(piece.as_ref(), &mut dirty, &digest, &aux).unwrap();

    let mut fresh = Canvas::new(66, 66);
    hashart::render(piece.as_ref(), &mut fresh, &digest, &aux).unwrap();

    assert_eq!(dirty.data, fresh.data);
}

#[test]
fn descriptions_do_not_require_a_canvas() {
    let digest = digest_of("describe me");
    for name in pieces::names() {
        let piece = pieces::lookup(name).unwrap();
        // Every shipped piece documents itself.
        let text = hashart::describe(piece.as_ref(), &digest)
            .unwrap_or_else(|| panic!("{name} has no description"));
        assert!(!text.is_empty());
    }
}

#[test]
fn element_name_is_computable_without_rendering() {
    let digest = digest_of("element");
    let name = hashart::pieces::element::element_name(&digest[..16]);
    assert!(!name.is_empty());
    assert_eq!(name, hashart::pieces::element::element_name(&digest[..16]));
}

#[test]
fn explanations_cover_the_digest_for_every_piece() {
    let digest = digest_of("explain");
    for name in pieces::names() {
        let piece = pieces::lookup(name).unwrap();
        let segments = hashart::explain(piece.as_ref(), &digest);
        let total: usize = segments.iter().map(|s| s.bytes.len() / 2).sum();
        assert_eq!(total, 32, "{name} segments do not cover the digest");
    }
}
