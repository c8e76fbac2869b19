#![allow(missing_docs)]
#![allow(dead_code)]

/// The profile header of the GSMA generic eUICC test profile.
pub const HEADER: &str = r#"value1 ProfileElement ::= header : {
  major-version 2,
  minor-version 1,
  profileType "GSMA Generic eUICC Test Profile",
  iccid '89000123456789012341'H,
  eUICC-Mandatory-services {
    usim NULL,
    isim NULL,
    csim NULL,
    usim-test-algorithm NULL,
    ber-tlv NULL
  },
  eUICC-Mandatory-GFSTEList {
    { 2 23 143 1 2 1 },
    { 2 23 143 1 2 3 },
    { 2 23 143 1 2 4 },
    { 2 23 143 1 2 5 },
    { 2 23 143 1 2 7 },
    { 2 23 143 1 2 8 },
    { 2 23 143 1 2 9 },
    { 2 23 143 1 2 10 },
    { 2 23 143 1 2 11 }
  }
}

"#;

/// A master file element with nested file descriptors and choices.
pub const MF: &str = r#"value2 ProfileElement ::= mf : {
  mf-header {
    mandated NULL,
    identification 4
  },
  templateID { 2 23 143 1 2 1 },
  mf {
    fileDescriptor : {
      pinStatusTemplateDO '01810A'H
    }
  },
  ef-pl {
    fileDescriptor : {
      efFileSize '0A'H
    },
    fillFileContent : 'FFFF'H
  },
  ef-iccid {
    fileDescriptor : {
      fileDescriptor '4121'H,
      efFileSize '0A'H,
      shortEFID '10'H
    },
    fillFileContent : '98001032547698103214'H
  }
}
"#;

/// An element mixing numbers, strings and an empty record.
pub const PIN_CODES: &str = r#"value3 ProfileElement ::= pinCodes : {
  pin-Header {
    mandated NULL,
    identification 5
  },
  pinCodes pinconfig : {
    {
      keyReference 1,
      pinValue '31323334FFFFFFFF'H,
      unblockingPINReference 1,
      pinAttributes 6,
      maxNumOfAttemps-retryNumLeft 51
    },
    {}
  },
  comment "retry counters: 3.0e0 and 0.5",
  ratio 0.5E-1
}
"#;

/// All elements above, in one file.
pub fn profile() -> String {
    [HEADER, MF, PIN_CODES].concat()
}
