#![no_main]

use complaint_store::Complaint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|line: &str| {
    if let Ok(c) = Complaint::parse_line(line) {
        // Anything that parses re-encodes to a line that parses to the same record.
        let again = Complaint::parse_line(&c.to_line()).expect("re-encoded line parses");
        assert_eq!(again, c);
    }
});
