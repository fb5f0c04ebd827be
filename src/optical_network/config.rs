pub const DEFAULT_REJECT_EMPTY_REQUESTS:bool = false;
pub const DEFAULT_AUDIT_BIJECTION:bool = cfg!(debug_assertions);

#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct LedgerConfig {
    // allocate with no fibers or no slots is a silent no-op unless this is set
    pub reject_empty_requests:bool,
    // re-check both indices after every allocate/release, panics on mismatch
    pub audit_bijection:bool,
}

impl LedgerConfig {
    pub fn new() -> Self {
        Self {
            reject_empty_requests:DEFAULT_REJECT_EMPTY_REQUESTS,
            audit_bijection:DEFAULT_AUDIT_BIJECTION,
        }
    }

    pub fn strict() -> Self {
        Self {reject_empty_requests:true,..Self::new()}
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new()
    }
}
