//! Template slicing and normalization properties.

use hashart::template::{big_integer, fraction, ByteTemplate, DIGEST_LEN};
use hashart::ArtError;
use num_bigint::BigUint;

fn counting_digest() -> [u8; DIGEST_LEN] {
    let mut digest = [0u8; DIGEST_LEN];
    for (i, b) in digest.iter_mut().enumerate() {
        *b = i as u8;
    }
    digest
}

#[test]
fn segments_always_cover_the_whole_digest() {
    let digest = counting_digest();
    let templates: Vec<ByteTemplate> = vec![
        ByteTemplate::new(&[("a", 1)]).unwrap(),
        ByteTemplate::new(&[("x1", 2), ("r1", 2), ("x2", 2), ("r2", 2)]).unwrap(),
        ByteTemplate::new(&[("everything", 32)]).unwrap(),
    ];

    for template in &templates {
        let segments = template.segments(&digest);
        let total_bytes: usize = segments.iter().map(|s| s.bytes.len() / 2).sum();
        assert_eq!(total_bytes, DIGEST_LEN);
    }
}

#[test]
fn unused_segment_is_last_and_only_when_needed() {
    let digest = counting_digest();

    let partial = ByteTemplate::new(&[("a", 4)]).unwrap();
    let segments = partial.segments(&digest);
    assert_eq!(segments.last().unwrap().name, "unused");
    assert_eq!(segments.last().unwrap().bytes.len(), (32 - 4) * 2);

    let full = ByteTemplate::new(&[("everything", 32)]).unwrap();
    let segments = full.segments(&digest);
    assert!(segments.iter().all(|s| s.name != "unused"));
}

#[test]
fn segment_hex_matches_the_bytes() {
    let digest = counting_digest();
    let template = ByteTemplate::new(&[("head", 3)]).unwrap();
    let segments = template.segments(&digest);
    assert_eq!(segments[0].bytes, "000102");
}

#[test]
fn fraction_is_deterministic_and_bounded() {
    let digest = counting_digest();
    for width in 1..=DIGEST_LEN {
        let slice = &digest[..width];
        let a = fraction(slice);
        let b = fraction(slice);
        assert_eq!(a, b);
        assert!((0.0..1.0).contains(&a));
    }
}

#[test]
fn fraction_known_values() {
    assert_eq!(fraction(&[]), 0.0);
    assert_eq!(fraction(&[0; 32]), 0.0);
    assert_eq!(fraction(&[255]), 0.99609375);
}

#[test]
fn big_integer_conventions() {
    assert_eq!(big_integer(&[0x01, 0x00], 0), BigUint::from(256u32));
    // Seeding at 1 places the seed above the highest byte.
    assert_eq!(
        big_integer(&[0x01, 0x00], 1),
        BigUint::from(65536u32 + 256)
    );
    assert_eq!(big_integer(&[0, 0, 0, 7], 0), big_integer(&[7], 0));
}

#[test]
fn construction_errors() {
    assert!(matches!(ByteTemplate::new(&[]), Err(ArtError::EmptyTemplate)));
    assert!(matches!(
        ByteTemplate::new(&[("too", 16), ("wide", 17)]),
        Err(ArtError::TemplateTooWide { total: 33 })
    ));
}
