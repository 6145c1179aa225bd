//! Static list of state and union territory names accepted by the upstream
//! `filters[state_name]` parameter.

pub const STATES: &[&str] = &[
    "UTTAR PRADESH",
    "MADHYA PRADESH",
    "BIHAR",
    "ASSAM",
    "MAHARASHTRA",
    "GUJARAT",
    "RAJASTHAN",
    "TAMIL NADU",
    "CHHATTISGARH",
    "KARNATAKA",
    "TELANGANA",
    "ODISHA",
    "ANDHRA PRADESH",
    "PUNJAB",
    "JHARKHAND",
    "HARYANA",
    "ARUNACHAL PRADESH",
    "JAMMU AND KASHMIR",
    "MANIPUR",
    "UTTARAKHAND",
    "KERALA",
    "HIMACHAL PRADESH",
    "MEGHALAYA",
    "WEST BENGAL",
    "MIZORAM",
    "NAGALAND",
    "TRIPURA",
    "SIKKIM",
    "ANDAMAN AND NICOBAR",
    "LADAKH",
    "PUDUCHERRY",
    "GOA",
    "DN HAVELI AND DD",
    "LAKSHADWEEP",
];
