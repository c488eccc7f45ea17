#![no_main]

use libfuzzer_sys::fuzz_target;
use dotdump::{metadata::tables::TableId, Session};

fuzz_target!(|data: &[u8]| {
    if let Ok(session) = Session::from_mem(data.to_vec(), None) {
        let mut sink = Vec::new();
        for table in [TableId::Module, TableId::Assembly, TableId::AssemblyRef, TableId::EncLog] {
            let _ = session.dump(table, &mut sink);
        }
    }
});
