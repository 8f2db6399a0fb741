use embedded_hal::i2c::I2c;
use heapless::Vec;

// Valid 7-bit address window; everything outside it is reserved.
const FIRST_ADDRESS: u8 = 0x08;
const LAST_ADDRESS: u8 = 0x77;

/// Upper bound on remembered responders; only one display is expected.
pub const MAX_DEVICES: usize = 8;

/// The bus scan came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoDisplayFound;

/// Probes every valid address with a one-byte read and collects the ones
/// that acknowledge.
pub fn scan<B: I2c>(bus: &mut B) -> Vec<u8, MAX_DEVICES> {
    let mut found = Vec::new();
    for address in FIRST_ADDRESS..=LAST_ADDRESS {
        let mut probe = [0u8; 1];
        if bus.read(address, &mut probe).is_ok() {
            if found.push(address).is_err() {
                break;
            }
        }
    }
    found
}

/// Returns the address of the first responding device, or an error if the
/// bus is silent. Whether that is fatal is the caller's decision.
pub fn find_display<B: I2c>(bus: &mut B) -> Result<u8, NoDisplayFound> {
    scan(bus).first().copied().ok_or(NoDisplayFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource, Operation};

    /// Bus double that acknowledges a fixed set of addresses.
    struct FakeBus {
        responders: &'static [u8],
    }

    impl embedded_hal::i2c::ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.responders.contains(&address) {
                Ok(())
            } else {
                Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
            }
        }
    }

    #[test]
    fn silent_bus_reports_no_display() {
        let mut bus = FakeBus { responders: &[] };
        assert!(scan(&mut bus).is_empty());
        assert_eq!(find_display(&mut bus), Err(NoDisplayFound));
    }

    #[test]
    fn first_responder_wins() {
        let mut bus = FakeBus {
            responders: &[0x3C, 0x3D],
        };
        let found = scan(&mut bus);
        assert_eq!(found.as_slice(), &[0x3C, 0x3D]);
        assert_eq!(find_display(&mut bus), Ok(0x3C));
    }

    #[test]
    fn reserved_addresses_are_never_probed() {
        // A device squatting on a reserved address must not be reported.
        let mut bus = FakeBus {
            responders: &[0x03, 0x7A],
        };
        assert!(scan(&mut bus).is_empty());
        assert_eq!(find_display(&mut bus), Err(NoDisplayFound));
    }

    #[test]
    fn crowded_bus_is_truncated_not_overflowed() {
        static CROWD: [u8; 12] = [
            0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B,
        ];
        let mut bus = FakeBus { responders: &CROWD };
        let found = scan(&mut bus);
        assert_eq!(found.len(), MAX_DEVICES);
        assert_eq!(found.as_slice(), &CROWD[..MAX_DEVICES]);
    }
}
