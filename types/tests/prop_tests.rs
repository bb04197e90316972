use proptest::prelude::*;

use govlock_types::{CallPayload, ContractAddress, Selector, Timestamp};

proptest! {
    /// ContractAddress::is_zero is true only for all-zero bytes.
    #[test]
    fn address_is_zero_correct(bytes in prop::array::uniform20(0u8..)) {
        let addr = ContractAddress::new(bytes);
        prop_assert_eq!(addr.is_zero(), bytes == [0u8; 20]);
    }

    /// Address hex display parses back to the same address.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let addr = ContractAddress::new(bytes);
        let parsed: ContractAddress = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// The payload selector is always the first 4 bytes when present.
    #[test]
    fn payload_selector_is_leading_bytes(bytes in prop::collection::vec(any::<u8>(), 4..64)) {
        let payload = CallPayload::from_bytes(bytes.clone());
        let selector = payload.selector();
        prop_assert_eq!(selector.as_bytes(), &bytes[..4]);
        prop_assert_eq!(payload.args(), &bytes[4..]);
    }

    /// Encoded arguments decode to the same values.
    #[test]
    fn payload_args_decode(value in any::<u64>(), flag in any::<bool>()) {
        let sel = Selector::from_signature("f(uint64,bool)");
        let payload = CallPayload::encode(sel, &(value, flag)).unwrap();
        let decoded: (u64, bool) = payload.decode_args().unwrap();
        prop_assert_eq!(decoded, (value, flag));
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired_correct(
        start in 0u64..500_000,
        duration in 1u64..500_000,
        offset in 0u64..1_000_000,
    ) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(start.saturating_add(offset));
        prop_assert_eq!(t.has_expired(duration, now), offset >= duration);
    }

    /// saturating_add never wraps.
    #[test]
    fn timestamp_saturating_add(start in any::<u64>(), secs in any::<u64>()) {
        let t = Timestamp::new(start).saturating_add(secs);
        prop_assert!(t >= Timestamp::new(start));
    }
}
