/// The primitive wire type of a method or content-property field.
///
/// `Bit` is the odd one out: consecutive `Bit` fields in a schema are
/// packed LSB-first into shared octets, so codecs must look ahead in the
/// field list to know when a bit run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    Bit,
    Octet,
    Short,
    Long,
    LongLong,
    Timestamp,
    ShortStr,
    LongStr,
    Table,
}

impl FieldDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldDomain::Bit => "bit",
            FieldDomain::Octet => "octet",
            FieldDomain::Short => "short",
            FieldDomain::Long => "long",
            FieldDomain::LongLong => "longlong",
            FieldDomain::Timestamp => "timestamp",
            FieldDomain::ShortStr => "shortstr",
            FieldDomain::LongStr => "longstr",
            FieldDomain::Table => "table",
        }
    }
}

impl std::fmt::Display for FieldDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
