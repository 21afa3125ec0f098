//! Tax-year 2024 rules for the 50 states and the District of Columbia.
//!
//! Phase-outs, recapture provisions, local income taxes and refundable
//! credits are not modelled; where a deduction phases out the maximum
//! amount is used.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::rules::{CreditBasis, StateRule, StateSchedule};
use crate::models::BracketTable;

fn table(pairs: &[(Decimal, Decimal)]) -> BracketTable {
    BracketTable::from_thresholds(pairs)
}

/// 2024 federal standard deduction, for states that start from federal
/// taxable income or adopt the federal amounts.
fn federal_standard(rule: StateRule) -> StateRule {
    rule.standard_deduction(dec!(14600), dec!(29200))
        .standard_deduction_hoh(dec!(21900))
}

pub(super) fn all() -> Vec<StateRule> {
    let mut rules = no_income_tax();
    rules.extend(flat_rate());
    rules.extend(bracket_schedules());
    rules
}

fn no_income_tax() -> Vec<StateRule> {
    vec![
        StateRule::no_income_tax("AK", "Alaska"),
        StateRule::no_income_tax("FL", "Florida"),
        StateRule::no_income_tax("NV", "Nevada"),
        StateRule::no_income_tax("NH", "New Hampshire")
            .note("Interest and dividends tax of 3% applies separately; repealed from 2025"),
        StateRule::no_income_tax("SD", "South Dakota"),
        StateRule::no_income_tax("TN", "Tennessee"),
        StateRule::no_income_tax("TX", "Texas"),
        StateRule::no_income_tax("WA", "Washington")
            .note("7% excise tax on long-term capital gains above $262,000 applies separately"),
        StateRule::no_income_tax("WY", "Wyoming"),
    ]
}

fn flat_rate() -> Vec<StateRule> {
    vec![
        federal_standard(StateRule::flat("AZ", "Arizona", dec!(0.025)))
            .age_blind_exemption(dec!(2100))
            .credit("Dependent tax credit", CreditBasis::PerDependent, dec!(100)),
        federal_standard(StateRule::flat("CO", "Colorado", dec!(0.0425)))
            .note("Starts from federal taxable income"),
        StateRule::flat("GA", "Georgia", dec!(0.0539))
            .standard_deduction(dec!(12000), dec!(24000))
            .dependent_exemption(dec!(4000))
            .age_blind_exemption(dec!(1300)),
        federal_standard(StateRule::flat("ID", "Idaho", dec!(0.05695)))
            .credit("Grocery credit", CreditBasis::PerFiler, dec!(120))
            .credit("Grocery credit (dependents)", CreditBasis::PerDependent, dec!(120)),
        StateRule::flat("IL", "Illinois", dec!(0.0495))
            .personal_exemption(dec!(2775), dec!(5550))
            .dependent_exemption(dec!(2775))
            .age_blind_exemption(dec!(1000)),
        StateRule::flat("IN", "Indiana", dec!(0.0305))
            .personal_exemption(dec!(1000), dec!(2000))
            .dependent_exemption(dec!(1000))
            .age_blind_exemption(dec!(1000))
            .note("County income tax not included"),
        StateRule::flat("KY", "Kentucky", dec!(0.04)).standard_deduction(dec!(3160), dec!(6320)),
        StateRule::flat("MA", "Massachusetts", dec!(0.05))
            .personal_exemption(dec!(4400), dec!(8800))
            .personal_exemption_hoh(dec!(6800))
            .dependent_exemption(dec!(1000))
            .age_blind_exemption(dec!(700))
            .surtax("4% surtax", dec!(1053750), dec!(0.04)),
        StateRule::flat("MI", "Michigan", dec!(0.0425))
            .personal_exemption(dec!(5600), dec!(11200))
            .dependent_exemption(dec!(5600))
            .age_blind_exemption(dec!(3300))
            .note("City income tax not included"),
        StateRule::flat("NC", "North Carolina", dec!(0.045))
            .standard_deduction(dec!(12750), dec!(25500))
            .standard_deduction_hoh(dec!(19125)),
        StateRule::flat("PA", "Pennsylvania", dec!(0.0307))
            .note("Local earned income tax not included"),
        StateRule::flat("UT", "Utah", dec!(0.0455))
            .note("Taxpayer tax credit and its phase-out not included"),
    ]
}

fn bracket_schedules() -> Vec<StateRule> {
    vec![
        StateRule::brackets(
            "AL",
            "Alabama",
            StateSchedule::new(
                table(&[(dec!(0), dec!(0.02)), (dec!(500), dec!(0.04)), (dec!(3000), dec!(0.05))]),
                table(&[(dec!(0), dec!(0.02)), (dec!(1000), dec!(0.04)), (dec!(6000), dec!(0.05))]),
            ),
        )
        .standard_deduction(dec!(2500), dec!(7500))
        .standard_deduction_hoh(dec!(4700))
        .personal_exemption(dec!(1500), dec!(3000))
        .personal_exemption_hoh(dec!(3000))
        .dependent_exemption(dec!(500))
        .note("Deduction for federal income tax paid not included"),
        StateRule::brackets(
            "AR",
            "Arkansas",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0)),
                (dec!(5500), dec!(0.02)),
                (dec!(10900), dec!(0.03)),
                (dec!(15600), dec!(0.034)),
                (dec!(25700), dec!(0.039)),
            ])),
        )
        .standard_deduction(dec!(2340), dec!(4680))
        .credit("Personal tax credit", CreditBasis::PerFiler, dec!(29))
        .credit("Dependent tax credit", CreditBasis::PerDependent, dec!(29))
        .credit("Age/blind tax credit", CreditBasis::PerAgeOrBlindFlag, dec!(29)),
        StateRule::brackets(
            "CA",
            "California",
            StateSchedule::doubled(table(&[
                (dec!(0), dec!(0.01)),
                (dec!(10756), dec!(0.02)),
                (dec!(25499), dec!(0.04)),
                (dec!(40245), dec!(0.06)),
                (dec!(55866), dec!(0.08)),
                (dec!(70606), dec!(0.093)),
                (dec!(360659), dec!(0.103)),
                (dec!(432787), dec!(0.113)),
                (dec!(721314), dec!(0.123)),
            ]))
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.01)),
                (dec!(21527), dec!(0.02)),
                (dec!(51000), dec!(0.04)),
                (dec!(65744), dec!(0.06)),
                (dec!(81364), dec!(0.08)),
                (dec!(96107), dec!(0.093)),
                (dec!(490493), dec!(0.103)),
                (dec!(588593), dec!(0.113)),
                (dec!(980987), dec!(0.123)),
            ])),
        )
        .standard_deduction(dec!(5540), dec!(11080))
        .standard_deduction_hoh(dec!(11080))
        .credit("Personal exemption credit", CreditBasis::PerFiler, dec!(149))
        .credit("Dependent exemption credit", CreditBasis::PerDependent, dec!(461))
        .credit("Senior/blind exemption credit", CreditBasis::PerAgeOrBlindFlag, dec!(149))
        .surtax("Mental Health Services Tax", dec!(1000000), dec!(0.01)),
        StateRule::brackets(
            "CT",
            "Connecticut",
            StateSchedule::doubled(table(&[
                (dec!(0), dec!(0.02)),
                (dec!(10000), dec!(0.045)),
                (dec!(50000), dec!(0.055)),
                (dec!(100000), dec!(0.06)),
                (dec!(200000), dec!(0.065)),
                (dec!(250000), dec!(0.069)),
                (dec!(500000), dec!(0.0699)),
            ]))
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.02)),
                (dec!(16000), dec!(0.045)),
                (dec!(80000), dec!(0.055)),
                (dec!(160000), dec!(0.06)),
                (dec!(320000), dec!(0.065)),
                (dec!(400000), dec!(0.069)),
                (dec!(800000), dec!(0.0699)),
            ])),
        )
        .personal_exemption(dec!(15000), dec!(24000))
        .personal_exemption_hoh(dec!(19000))
        .note("Exemption phase-out and benefit recapture not included"),
        StateRule::brackets(
            "DE",
            "Delaware",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0)),
                (dec!(2000), dec!(0.022)),
                (dec!(5000), dec!(0.039)),
                (dec!(10000), dec!(0.048)),
                (dec!(20000), dec!(0.052)),
                (dec!(25000), dec!(0.0555)),
                (dec!(60000), dec!(0.066)),
            ])),
        )
        .standard_deduction(dec!(3250), dec!(6500))
        .credit("Personal credit", CreditBasis::PerFiler, dec!(110))
        .credit("Dependent credit", CreditBasis::PerDependent, dec!(110))
        .credit("Age/blind credit", CreditBasis::PerAgeOrBlindFlag, dec!(110)),
        federal_standard(StateRule::brackets(
            "DC",
            "District of Columbia",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0.04)),
                (dec!(10000), dec!(0.06)),
                (dec!(40000), dec!(0.065)),
                (dec!(60000), dec!(0.085)),
                (dec!(250000), dec!(0.0925)),
                (dec!(500000), dec!(0.0975)),
                (dec!(1000000), dec!(0.1075)),
            ])),
        )),
        StateRule::brackets(
            "HI",
            "Hawaii",
            StateSchedule::doubled(table(&[
                (dec!(0), dec!(0.014)),
                (dec!(2400), dec!(0.032)),
                (dec!(4800), dec!(0.055)),
                (dec!(9600), dec!(0.064)),
                (dec!(14400), dec!(0.068)),
                (dec!(19200), dec!(0.072)),
                (dec!(24000), dec!(0.076)),
                (dec!(36000), dec!(0.079)),
                (dec!(48000), dec!(0.0825)),
                (dec!(150000), dec!(0.09)),
                (dec!(175000), dec!(0.10)),
                (dec!(200000), dec!(0.11)),
            ]))
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.014)),
                (dec!(3600), dec!(0.032)),
                (dec!(7200), dec!(0.055)),
                (dec!(14400), dec!(0.064)),
                (dec!(21600), dec!(0.068)),
                (dec!(28800), dec!(0.072)),
                (dec!(36000), dec!(0.076)),
                (dec!(54000), dec!(0.079)),
                (dec!(72000), dec!(0.0825)),
                (dec!(225000), dec!(0.09)),
                (dec!(262500), dec!(0.10)),
                (dec!(300000), dec!(0.11)),
            ])),
        )
        .standard_deduction(dec!(4400), dec!(8800))
        .standard_deduction_hoh(dec!(6424))
        .personal_exemption(dec!(1144), dec!(2288))
        .dependent_exemption(dec!(1144))
        .age_blind_exemption(dec!(1144))
        .capital_gains_max_rate(dec!(0.0725)),
        federal_standard(StateRule::brackets(
            "IA",
            "Iowa",
            StateSchedule::doubled(table(&[
                (dec!(0), dec!(0.044)),
                (dec!(6210), dec!(0.0482)),
                (dec!(31050), dec!(0.057)),
            ])),
        ))
        .credit("Personal credit", CreditBasis::PerFiler, dec!(40))
        .credit("Dependent credit", CreditBasis::PerDependent, dec!(40))
        .credit("Age 65 or older credit", CreditBasis::PerAgeOrBlindFlag, dec!(20)),
        StateRule::brackets(
            "KS",
            "Kansas",
            StateSchedule::doubled(table(&[(dec!(0), dec!(0.052)), (dec!(23000), dec!(0.0558))])),
        )
        .standard_deduction(dec!(3605), dec!(8240))
        .standard_deduction_hoh(dec!(6180))
        .personal_exemption(dec!(9160), dec!(18320))
        .dependent_exemption(dec!(2320)),
        StateRule::brackets(
            "LA",
            "Louisiana",
            StateSchedule::doubled(table(&[
                (dec!(0), dec!(0.0185)),
                (dec!(12500), dec!(0.035)),
                (dec!(50000), dec!(0.0425)),
            ])),
        )
        .personal_exemption(dec!(4500), dec!(9000))
        .personal_exemption_hoh(dec!(9000))
        .dependent_exemption(dec!(1000))
        .note("Combined personal exemption and standard deduction"),
        federal_standard(StateRule::brackets(
            "ME",
            "Maine",
            StateSchedule::doubled(table(&[
                (dec!(0), dec!(0.058)),
                (dec!(26050), dec!(0.0675)),
                (dec!(61600), dec!(0.0715)),
            ]))
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.058)),
                (dec!(39050), dec!(0.0675)),
                (dec!(92450), dec!(0.0715)),
            ])),
        ))
        .personal_exemption(dec!(5000), dec!(10000))
        .credit("Dependent exemption credit", CreditBasis::PerDependent, dec!(300)),
        StateRule::brackets(
            "MD",
            "Maryland",
            StateSchedule::new(
                table(&[
                    (dec!(0), dec!(0.02)),
                    (dec!(1000), dec!(0.03)),
                    (dec!(2000), dec!(0.04)),
                    (dec!(3000), dec!(0.0475)),
                    (dec!(100000), dec!(0.05)),
                    (dec!(125000), dec!(0.0525)),
                    (dec!(150000), dec!(0.055)),
                    (dec!(250000), dec!(0.0575)),
                ]),
                table(&[
                    (dec!(0), dec!(0.02)),
                    (dec!(1000), dec!(0.03)),
                    (dec!(2000), dec!(0.04)),
                    (dec!(3000), dec!(0.0475)),
                    (dec!(150000), dec!(0.05)),
                    (dec!(175000), dec!(0.0525)),
                    (dec!(225000), dec!(0.055)),
                    (dec!(300000), dec!(0.0575)),
                ]),
            ),
        )
        .standard_deduction(dec!(2550), dec!(5150))
        .standard_deduction_hoh(dec!(5150))
        .personal_exemption(dec!(3200), dec!(6400))
        .dependent_exemption(dec!(3200))
        .age_blind_exemption(dec!(1000))
        .note("County income tax not included"),
        StateRule::brackets(
            "MN",
            "Minnesota",
            StateSchedule::new(
                table(&[
                    (dec!(0), dec!(0.0535)),
                    (dec!(31690), dec!(0.068)),
                    (dec!(104090), dec!(0.0785)),
                    (dec!(193240), dec!(0.0985)),
                ]),
                table(&[
                    (dec!(0), dec!(0.0535)),
                    (dec!(46330), dec!(0.068)),
                    (dec!(184040), dec!(0.0785)),
                    (dec!(321450), dec!(0.0985)),
                ]),
            )
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.0535)),
                (dec!(39010), dec!(0.068)),
                (dec!(156760), dec!(0.0785)),
                (dec!(256880), dec!(0.0985)),
            ])),
        )
        .standard_deduction(dec!(14575), dec!(29150))
        .standard_deduction_hoh(dec!(21900))
        .dependent_exemption(dec!(5050))
        .age_blind_exemption(dec!(1550)),
        StateRule::brackets(
            "MS",
            "Mississippi",
            StateSchedule::uniform(table(&[(dec!(0), dec!(0)), (dec!(10000), dec!(0.047))])),
        )
        .standard_deduction(dec!(2300), dec!(4600))
        .standard_deduction_hoh(dec!(3400))
        .personal_exemption(dec!(6000), dec!(12000))
        .personal_exemption_hoh(dec!(9500))
        .dependent_exemption(dec!(1500))
        .age_blind_exemption(dec!(1500)),
        federal_standard(StateRule::brackets(
            "MO",
            "Missouri",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0)),
                (dec!(1273), dec!(0.02)),
                (dec!(2546), dec!(0.025)),
                (dec!(3819), dec!(0.03)),
                (dec!(5092), dec!(0.035)),
                (dec!(6365), dec!(0.04)),
                (dec!(7638), dec!(0.045)),
                (dec!(8911), dec!(0.048)),
            ])),
        )),
        federal_standard(StateRule::brackets(
            "MT",
            "Montana",
            StateSchedule::doubled(table(&[(dec!(0), dec!(0.047)), (dec!(20500), dec!(0.059))]))
                .with_head_of_household(table(&[
                    (dec!(0), dec!(0.047)),
                    (dec!(30750), dec!(0.059)),
                ])),
        ))
        .capital_gains_max_rate(dec!(0.041))
        .note("Starts from federal taxable income"),
        StateRule::brackets(
            "NE",
            "Nebraska",
            StateSchedule::new(
                table(&[
                    (dec!(0), dec!(0.0246)),
                    (dec!(3900), dec!(0.0351)),
                    (dec!(23370), dec!(0.0501)),
                    (dec!(37670), dec!(0.0584)),
                ]),
                table(&[
                    (dec!(0), dec!(0.0246)),
                    (dec!(7790), dec!(0.0351)),
                    (dec!(46760), dec!(0.0501)),
                    (dec!(75340), dec!(0.0584)),
                ]),
            )
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.0246)),
                (dec!(7270), dec!(0.0351)),
                (dec!(37400), dec!(0.0501)),
                (dec!(55850), dec!(0.0584)),
            ])),
        )
        .standard_deduction(dec!(8300), dec!(16600))
        .standard_deduction_hoh(dec!(12150))
        .credit("Personal exemption credit", CreditBasis::PerFiler, dec!(171))
        .credit("Dependent exemption credit", CreditBasis::PerDependent, dec!(171)),
        {
            let joint = table(&[
                (dec!(0), dec!(0.014)),
                (dec!(20000), dec!(0.0175)),
                (dec!(50000), dec!(0.0245)),
                (dec!(70000), dec!(0.035)),
                (dec!(80000), dec!(0.05525)),
                (dec!(150000), dec!(0.0637)),
                (dec!(500000), dec!(0.0897)),
                (dec!(1000000), dec!(0.1075)),
            ]);
            StateRule::brackets(
                "NJ",
                "New Jersey",
                StateSchedule::new(
                    table(&[
                        (dec!(0), dec!(0.014)),
                        (dec!(20000), dec!(0.0175)),
                        (dec!(35000), dec!(0.035)),
                        (dec!(40000), dec!(0.05525)),
                        (dec!(75000), dec!(0.0637)),
                        (dec!(500000), dec!(0.0897)),
                        (dec!(1000000), dec!(0.1075)),
                    ]),
                    joint.clone(),
                )
                .with_head_of_household(joint),
            )
            .personal_exemption(dec!(1000), dec!(2000))
            .dependent_exemption(dec!(1500))
            .age_blind_exemption(dec!(1000))
        },
        {
            let joint = table(&[
                (dec!(0), dec!(0.017)),
                (dec!(8000), dec!(0.032)),
                (dec!(16000), dec!(0.047)),
                (dec!(24000), dec!(0.049)),
                (dec!(315000), dec!(0.059)),
            ]);
            federal_standard(StateRule::brackets(
                "NM",
                "New Mexico",
                StateSchedule::new(
                    table(&[
                        (dec!(0), dec!(0.017)),
                        (dec!(5500), dec!(0.032)),
                        (dec!(11000), dec!(0.047)),
                        (dec!(16000), dec!(0.049)),
                        (dec!(210000), dec!(0.059)),
                    ]),
                    joint.clone(),
                )
                .with_head_of_household(joint),
            ))
            .dependent_exemption(dec!(4000))
        },
        StateRule::brackets(
            "NY",
            "New York",
            StateSchedule::new(
                table(&[
                    (dec!(0), dec!(0.04)),
                    (dec!(8500), dec!(0.045)),
                    (dec!(11700), dec!(0.0525)),
                    (dec!(13900), dec!(0.055)),
                    (dec!(80650), dec!(0.06)),
                    (dec!(215400), dec!(0.0685)),
                    (dec!(1077550), dec!(0.0965)),
                    (dec!(5000000), dec!(0.103)),
                    (dec!(25000000), dec!(0.109)),
                ]),
                table(&[
                    (dec!(0), dec!(0.04)),
                    (dec!(17150), dec!(0.045)),
                    (dec!(23600), dec!(0.0525)),
                    (dec!(27900), dec!(0.055)),
                    (dec!(161550), dec!(0.06)),
                    (dec!(323200), dec!(0.0685)),
                    (dec!(2155350), dec!(0.0965)),
                    (dec!(5000000), dec!(0.103)),
                    (dec!(25000000), dec!(0.109)),
                ]),
            )
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.04)),
                (dec!(12800), dec!(0.045)),
                (dec!(17650), dec!(0.0525)),
                (dec!(20900), dec!(0.055)),
                (dec!(107650), dec!(0.06)),
                (dec!(269300), dec!(0.0685)),
                (dec!(1616450), dec!(0.0965)),
                (dec!(5000000), dec!(0.103)),
                (dec!(25000000), dec!(0.109)),
            ])),
        )
        .standard_deduction(dec!(8000), dec!(16050))
        .standard_deduction_hoh(dec!(11200))
        .dependent_exemption(dec!(1000))
        .note("New York City and Yonkers taxes not included"),
        federal_standard(StateRule::brackets(
            "ND",
            "North Dakota",
            StateSchedule::new(
                table(&[
                    (dec!(0), dec!(0)),
                    (dec!(47150), dec!(0.0195)),
                    (dec!(238200), dec!(0.025)),
                ]),
                table(&[
                    (dec!(0), dec!(0)),
                    (dec!(78775), dec!(0.0195)),
                    (dec!(289975), dec!(0.025)),
                ]),
            )
            .with_head_of_household(table(&[
                (dec!(0), dec!(0)),
                (dec!(63175), dec!(0.0195)),
                (dec!(264100), dec!(0.025)),
            ])),
        ))
        .note("Starts from federal taxable income"),
        StateRule::brackets(
            "OH",
            "Ohio",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0)),
                (dec!(26050), dec!(0.0275)),
                (dec!(100000), dec!(0.035)),
            ])),
        )
        .personal_exemption(dec!(2400), dec!(4800))
        .dependent_exemption(dec!(2400))
        .credit("Personal exemption credit", CreditBasis::PerFiler, dec!(20))
        .credit("Dependent exemption credit", CreditBasis::PerDependent, dec!(20))
        .note("School district and municipal income taxes not included"),
        StateRule::brackets(
            "OK",
            "Oklahoma",
            StateSchedule::doubled(table(&[
                (dec!(0), dec!(0.0025)),
                (dec!(1000), dec!(0.0075)),
                (dec!(2500), dec!(0.0175)),
                (dec!(3750), dec!(0.0275)),
                (dec!(4900), dec!(0.0375)),
                (dec!(7200), dec!(0.0475)),
            ])),
        )
        .standard_deduction(dec!(6350), dec!(12700))
        .standard_deduction_hoh(dec!(9350))
        .personal_exemption(dec!(1000), dec!(2000))
        .dependent_exemption(dec!(1000))
        .age_blind_exemption(dec!(1000)),
        {
            let joint = table(&[
                (dec!(0), dec!(0.0475)),
                (dec!(8600), dec!(0.0675)),
                (dec!(21500), dec!(0.0875)),
                (dec!(250000), dec!(0.099)),
            ]);
            StateRule::brackets(
                "OR",
                "Oregon",
                StateSchedule::new(
                    table(&[
                        (dec!(0), dec!(0.0475)),
                        (dec!(4300), dec!(0.0675)),
                        (dec!(10750), dec!(0.0875)),
                        (dec!(125000), dec!(0.099)),
                    ]),
                    joint.clone(),
                )
                .with_head_of_household(joint),
            )
            .standard_deduction(dec!(2745), dec!(5495))
            .standard_deduction_hoh(dec!(4420))
            .age_blind_exemption(dec!(1200))
            .credit("Personal exemption credit", CreditBasis::PerFiler, dec!(249))
            .credit("Dependent exemption credit", CreditBasis::PerDependent, dec!(249))
            .note("Federal tax subtraction not included")
        },
        StateRule::brackets(
            "RI",
            "Rhode Island",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0.0375)),
                (dec!(77450), dec!(0.0475)),
                (dec!(176050), dec!(0.0599)),
            ])),
        )
        .standard_deduction(dec!(10550), dec!(21150))
        .standard_deduction_hoh(dec!(15850))
        .personal_exemption(dec!(4950), dec!(9900))
        .dependent_exemption(dec!(4950)),
        federal_standard(StateRule::brackets(
            "SC",
            "South Carolina",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0)),
                (dec!(3460), dec!(0.03)),
                (dec!(17330), dec!(0.062)),
            ])),
        ))
        .dependent_exemption(dec!(4610))
        .note("Starts from federal taxable income"),
        StateRule::brackets(
            "VT",
            "Vermont",
            StateSchedule::new(
                table(&[
                    (dec!(0), dec!(0.0335)),
                    (dec!(47900), dec!(0.066)),
                    (dec!(116000), dec!(0.076)),
                    (dec!(242000), dec!(0.0875)),
                ]),
                table(&[
                    (dec!(0), dec!(0.0335)),
                    (dec!(79950), dec!(0.066)),
                    (dec!(193300), dec!(0.076)),
                    (dec!(294600), dec!(0.0875)),
                ]),
            )
            .with_head_of_household(table(&[
                (dec!(0), dec!(0.0335)),
                (dec!(64200), dec!(0.066)),
                (dec!(165700), dec!(0.076)),
                (dec!(268300), dec!(0.0875)),
            ])),
        )
        .standard_deduction(dec!(7400), dec!(14850))
        .standard_deduction_hoh(dec!(11100))
        .personal_exemption(dec!(5100), dec!(10200))
        .dependent_exemption(dec!(5100)),
        StateRule::brackets(
            "VA",
            "Virginia",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0.02)),
                (dec!(3000), dec!(0.03)),
                (dec!(5000), dec!(0.05)),
                (dec!(17000), dec!(0.0575)),
            ])),
        )
        .standard_deduction(dec!(8500), dec!(17000))
        .personal_exemption(dec!(930), dec!(1860))
        .dependent_exemption(dec!(930))
        .age_blind_exemption(dec!(800)),
        StateRule::brackets(
            "WV",
            "West Virginia",
            StateSchedule::uniform(table(&[
                (dec!(0), dec!(0.0236)),
                (dec!(10000), dec!(0.0315)),
                (dec!(25000), dec!(0.0354)),
                (dec!(40000), dec!(0.0472)),
                (dec!(60000), dec!(0.0512)),
            ])),
        )
        .personal_exemption(dec!(2000), dec!(4000))
        .dependent_exemption(dec!(2000)),
        StateRule::brackets(
            "WI",
            "Wisconsin",
            StateSchedule::new(
                table(&[
                    (dec!(0), dec!(0.035)),
                    (dec!(14320), dec!(0.044)),
                    (dec!(28640), dec!(0.053)),
                    (dec!(315310), dec!(0.0765)),
                ]),
                table(&[
                    (dec!(0), dec!(0.035)),
                    (dec!(19090), dec!(0.044)),
                    (dec!(38190), dec!(0.053)),
                    (dec!(420420), dec!(0.0765)),
                ]),
            ),
        )
        .standard_deduction(dec!(13230), dec!(24490))
        .standard_deduction_hoh(dec!(17090))
        .personal_exemption(dec!(700), dec!(1400))
        .dependent_exemption(dec!(700))
        .age_blind_exemption(dec!(250))
        .note("Sliding-scale standard deduction taken at its maximum"),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn codes_are_unique() {
        let rules = all();
        let mut codes: Vec<_> = rules.iter().map(|rule| rule.code).collect();
        codes.sort_unstable();
        codes.dedup();

        assert_eq!(codes.len(), rules.len());
    }

    #[test]
    fn codes_are_two_uppercase_letters() {
        for rule in all() {
            assert_eq!(rule.code.len(), 2);
            assert!(rule.code.chars().all(|c| c.is_ascii_uppercase()), "{}", rule.code);
        }
    }
}
