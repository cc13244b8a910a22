use std::fmt;

/// Node kind (§3). Default matches the original's `NodeType::STATION`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum NodeType {
    #[default]
    Station,
    Interchange,
    Junction,
    Depot,
    Yard,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Station => "station",
            NodeType::Interchange => "interchange",
            NodeType::Junction => "junction",
            NodeType::Depot => "depot",
            NodeType::Yard => "yard",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Track kind (§3). Default matches the original's `TrackType::SINGLE`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TrackType {
    #[default]
    Single,
    Double,
    HighSpeed,
    Freight,
}

impl TrackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackType::Single => "single",
            TrackType::Double => "double",
            TrackType::HighSpeed => "high_speed",
            TrackType::Freight => "freight",
        }
    }

    /// Whether two trains can occupy this track kind at once without a
    /// head-on risk, independent of direction (§4.4 head-on condition
    /// only fires on Single).
    pub fn is_single(&self) -> bool {
        matches!(self, TrackType::Single)
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Train kind (§3). Default matches the original's `TrainType::REGIONAL`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TrainType {
    #[default]
    Regional,
    Intercity,
    HighSpeed,
    Freight,
}

impl TrainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainType::Regional => "regional",
            TrainType::Intercity => "intercity",
            TrainType::HighSpeed => "high_speed",
            TrainType::Freight => "freight",
        }
    }

    /// Fixed priority boost used by the resolver's priority computation
    /// (SPEC_FULL §4.5): high-speed > intercity > regional > freight.
    pub fn priority_boost(&self) -> f64 {
        match self {
            TrainType::HighSpeed => 30.0,
            TrainType::Intercity => 20.0,
            TrainType::Regional => 10.0,
            TrainType::Freight => 0.0,
        }
    }
}

impl fmt::Display for TrainType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
