/// Controls what is decoded and how it is rendered.
///
/// All switches are off by default.  Use the builder-style setters to
/// turn them on:
///
/// ```
/// use sequoia_pgpdump::Options;
///
/// let o = Options::default().utc(true).integer(true);
/// assert!(o.get_utc());
/// assert!(! o.get_debug());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    armor: bool,
    debug: bool,
    utc: bool,
    literal: bool,
    marker: bool,
    private: bool,
    integer: bool,
}

impl Options {
    /// Only accepts ASCII armored input.
    pub fn armor(mut self, v: bool) -> Self {
        self.armor = v;
        self
    }

    /// Dumps fields that are normally masked, like the raw octets of
    /// algorithm identifiers.
    pub fn debug(mut self, v: bool) -> Self {
        self.debug = v;
        self
    }

    /// Renders times in UTC instead of the local time zone.
    pub fn utc(mut self, v: bool) -> Self {
        self.utc = v;
        self
    }

    /// Dumps the content of literal data packets.
    pub fn literal(mut self, v: bool) -> Self {
        self.literal = v;
        self
    }

    /// Dumps the content of marker packets.
    pub fn marker(mut self, v: bool) -> Self {
        self.marker = v;
        self
    }

    /// Dumps the content of private or experimental packets.
    pub fn private(mut self, v: bool) -> Self {
        self.private = v;
        self
    }

    /// Dumps the octets of multi-precision integers.
    pub fn integer(mut self, v: bool) -> Self {
        self.integer = v;
        self
    }

    /// Returns whether only armored input is accepted.
    pub fn get_armor(&self) -> bool { self.armor }
    /// Returns whether masked fields are dumped.
    pub fn get_debug(&self) -> bool { self.debug }
    /// Returns whether times are rendered in UTC.
    pub fn get_utc(&self) -> bool { self.utc }
    /// Returns whether literal data is dumped.
    pub fn get_literal(&self) -> bool { self.literal }
    /// Returns whether marker packets are dumped.
    pub fn get_marker(&self) -> bool { self.marker }
    /// Returns whether private packets are dumped.
    pub fn get_private(&self) -> bool { self.private }
    /// Returns whether MPIs are dumped.
    pub fn get_integer(&self) -> bool { self.integer }
}
