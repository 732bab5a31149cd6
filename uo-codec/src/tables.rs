// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static tables for UO frame decoding.
//!
//! The reference tables are fixed-point integers with per-table binary scale
//! factors. They are stored here as exact `integer / 2^n` quotients, which a
//! binary float represents without rounding, so the prepared reals match the
//! reference values bit-for-bit.

/// Scale factor for Q15 fixed-point table entries.
const Q15: f32 = 32768.0;
/// Scale factor for Q13 fixed-point table entries.
const Q13: f32 = 8192.0;
/// Scale factor for Q12 fixed-point table entries.
const Q12: f32 = 4096.0;

/// Three-tap predictor coefficients applied to the lag window when computing
/// the pitch vector, selected per subframe by a 6-bit index. The first
/// coefficient weighs the most recent tap. Stored pre-halved, as the decoder
/// uses them.
pub const SUBFRAME_LAG_COEFFICIENTS: [[f32; 3]; 64] = [
    [     0.0 / Q15,      0.0 / Q15,      0.0 / Q15],
    [  3003.0 / Q15,   4159.0 / Q15,   2511.0 / Q15],
    [  9094.0 / Q15,  13583.0 / Q15,   9435.0 / Q15],
    [  1085.0 / Q15,   2590.0 / Q15,    547.0 / Q15],
    [  1026.0 / Q15,  16932.0 / Q15,  14154.0 / Q15],
    [  7930.0 / Q15,   8681.0 / Q15,   7681.0 / Q15],
    [  8980.0 / Q15,  14967.0 / Q15,   8031.0 / Q15],
    [ -6636.0 / Q15,  27045.0 / Q15,   9831.0 / Q15],
    [  4451.0 / Q15,   7427.0 / Q15,   4779.0 / Q15],
    [  3754.0 / Q15,  26088.0 / Q15,   2270.0 / Q15],
    [ 13508.0 / Q15,  17468.0 / Q15,   1137.0 / Q15],
    [ 14209.0 / Q15,  22743.0 / Q15,  -6722.0 / Q15],
    [ 10229.0 / Q15,   -465.0 / Q15,   2310.0 / Q15],
    [   691.0 / Q15,   6446.0 / Q15,   4087.0 / Q15],
    [  8509.0 / Q15,  20397.0 / Q15,   3206.0 / Q15],
    [  1364.0 / Q15,   7450.0 / Q15,    253.0 / Q15],
    [  9787.0 / Q15,  24630.0 / Q15,  -2798.0 / Q15],
    [  6245.0 / Q15,  29873.0 / Q15,  -4916.0 / Q15],
    [ -2042.0 / Q15,  27572.0 / Q15,   5226.0 / Q15],
    [  3558.0 / Q15,   6031.0 / Q15,  -3291.0 / Q15],
    [   113.0 / Q15,    -44.0 / Q15,    439.0 / Q15],
    [  1975.0 / Q15,  15120.0 / Q15,  13035.0 / Q15],
    [  8383.0 / Q15,  10063.0 / Q15,   3112.0 / Q15],
    [  -379.0 / Q15,   4135.0 / Q15,  -1231.0 / Q15],
    [ 12715.0 / Q15,  15627.0 / Q15,   1844.0 / Q15],
    [  3857.0 / Q15,  10817.0 / Q15,   8170.0 / Q15],
    [  3658.0 / Q15,  20477.0 / Q15,   7977.0 / Q15],
    [  5127.0 / Q15,   7345.0 / Q15,    826.0 / Q15],
    [ -1018.0 / Q15,  10175.0 / Q15,   7433.0 / Q15],
    [ 14143.0 / Q15,  19889.0 / Q15,  -5920.0 / Q15],
    [ -5439.0 / Q15,  20391.0 / Q15,  14773.0 / Q15],
    [ -2345.0 / Q15,  21393.0 / Q15,   9029.0 / Q15],
    [ -2400.0 / Q15,  29370.0 / Q15,   -344.0 / Q15],
    [  6714.0 / Q15,  17917.0 / Q15,  -3581.0 / Q15],
    [   359.0 / Q15,  25499.0 / Q15,  -2057.0 / Q15],
    [ -8674.0 / Q15,  21380.0 / Q15,  14614.0 / Q15],
    [  2653.0 / Q15,  11153.0 / Q15,  -2884.0 / Q15],
    [ -4360.0 / Q15,   7079.0 / Q15,   4791.0 / Q15],
    [  1387.0 / Q15,  20492.0 / Q15, -12372.0 / Q15],
    [  2408.0 / Q15,   2747.0 / Q15,   9004.0 / Q15],
    [ -6656.0 / Q15,  11479.0 / Q15,   1898.0 / Q15],
    [ -1898.0 / Q15,   7159.0 / Q15,  -1626.0 / Q15],
    [  5740.0 / Q15,  13561.0 / Q15,   2338.0 / Q15],
    [ -1011.0 / Q15,   9361.0 / Q15,  -6838.0 / Q15],
    [  7425.0 / Q15,  10840.0 / Q15,  -1967.0 / Q15],
    [  1674.0 / Q15,  11487.0 / Q15,   2533.0 / Q15],
    [ -9077.0 / Q15,  14205.0 / Q15,   8557.0 / Q15],
    [ -1415.0 / Q15,   3845.0 / Q15,   2438.0 / Q15],
    [ -1938.0 / Q15,  12024.0 / Q15,  -1336.0 / Q15],
    [  3154.0 / Q15,  20840.0 / Q15,   8119.0 / Q15],
    [  9949.0 / Q15,  12255.0 / Q15,   9909.0 / Q15],
    [ -3195.0 / Q15,  15485.0 / Q15,   5113.0 / Q15],
    [ -1646.0 / Q15,   9276.0 / Q15,   2540.0 / Q15],
    [ -8800.0 / Q15,  13880.0 / Q15,  -7340.0 / Q15],
    [  2550.0 / Q15,  15522.0 / Q15,   6820.0 / Q15],
    [-10754.0 / Q15,  18685.0 / Q15,  -2674.0 / Q15],
    [  5963.0 / Q15,  11781.0 / Q15,  -8257.0 / Q15],
    [ 14472.0 / Q15,  12047.0 / Q15,  -5293.0 / Q15],
    [ 11891.0 / Q15,   9821.0 / Q15,  10400.0 / Q15],
    [  1747.0 / Q15,  19052.0 / Q15,   1931.0 / Q15],
    [  6592.0 / Q15,  25948.0 / Q15, -11065.0 / Q15],
    [ -2812.0 / Q15,  17014.0 / Q15,  -3155.0 / Q15],
    [  5474.0 / Q15,  -4816.0 / Q15,  16360.0 / Q15],
    [ -6565.0 / Q15,   6736.0 / Q15,  -1984.0 / Q15],
];

/// The index width, in bits, of each successive `LSF_TABLE` row. Earlier LSF
/// values predict from the most recent output samples and are quantized more
/// finely. 46 bits in total.
pub const LSF_INDEX_BITS: [u32; 10] = [6, 6, 5, 5, 4, 4, 4, 4, 3, 3];

/// Quantized Line Spectral Frequency values, one row per LSF, indexed by the
/// per-row number of bits in `LSF_INDEX_BITS`.
pub const LSF_TABLE: [&[f32]; 10] = [
    &[
        -32651.0 / Q15, -32558.0 / Q15, -32463.0 / Q15, -32362.0 / Q15,
        -32261.0 / Q15, -32161.0 / Q15, -32058.0 / Q15, -31943.0 / Q15,
        -31816.0 / Q15, -31677.0 / Q15, -31531.0 / Q15, -31389.0 / Q15,
        -31234.0 / Q15, -31071.0 / Q15, -30911.0 / Q15, -30741.0 / Q15,
        -30552.0 / Q15, -30335.0 / Q15, -30131.0 / Q15, -29915.0 / Q15,
        -29676.0 / Q15, -29416.0 / Q15, -29148.0 / Q15, -28871.0 / Q15,
        -28593.0 / Q15, -28268.0 / Q15, -27958.0 / Q15, -27632.0 / Q15,
        -27281.0 / Q15, -26901.0 / Q15, -26512.0 / Q15, -26096.0 / Q15,
        -25605.0 / Q15, -25117.0 / Q15, -24633.0 / Q15, -24121.0 / Q15,
        -23563.0 / Q15, -23003.0 / Q15, -22372.0 / Q15, -21690.0 / Q15,
        -20979.0 / Q15, -20253.0 / Q15, -19276.0 / Q15, -18367.0 / Q15,
        -17267.0 / Q15, -16162.0 / Q15, -15004.0 / Q15, -13717.0 / Q15,
        -12312.0 / Q15, -10748.0 / Q15,  -8971.0 / Q15,  -7125.0 / Q15,
         -5457.0 / Q15,  -3372.0 / Q15,  -1592.0 / Q15,    174.0 / Q15,
          2622.0 / Q15,   5094.0 / Q15,   7534.0 / Q15,   9871.0 / Q15,
         12724.0 / Q15,  15773.0 / Q15,  19324.0 / Q15,  24116.0 / Q15,
    ],
    &[
        -26896.0 / Q15, -22124.0 / Q15, -18432.0 / Q15, -15256.0 / Q15,
        -12751.0 / Q15, -10739.0 / Q15,  -8930.0 / Q15,  -7448.0 / Q15,
         -6169.0 / Q15,  -5088.0 / Q15,  -4017.0 / Q15,  -3043.0 / Q15,
         -2043.0 / Q15,  -1127.0 / Q15,   -177.0 / Q15,    593.0 / Q15,
          1369.0 / Q15,   2158.0 / Q15,   2978.0 / Q15,   3822.0 / Q15,
          4686.0 / Q15,   5531.0 / Q15,   6430.0 / Q15,   7327.0 / Q15,
          8113.0 / Q15,   9005.0 / Q15,   9834.0 / Q15,  10674.0 / Q15,
         11488.0 / Q15,  12282.0 / Q15,  13062.0 / Q15,  13936.0 / Q15,
         14709.0 / Q15,  15482.0 / Q15,  16211.0 / Q15,  16917.0 / Q15,
         17705.0 / Q15,  18429.0 / Q15,  19186.0 / Q15,  19888.0 / Q15,
         20505.0 / Q15,  21162.0 / Q15,  21837.0 / Q15,  22498.0 / Q15,
         23050.0 / Q15,  23600.0 / Q15,  24150.0 / Q15,  24657.0 / Q15,
         25176.0 / Q15,  25699.0 / Q15,  26175.0 / Q15,  26660.0 / Q15,
         27133.0 / Q15,  27617.0 / Q15,  28084.0 / Q15,  28574.0 / Q15,
         29042.0 / Q15,  29513.0 / Q15,  29965.0 / Q15,  30380.0 / Q15,
         30798.0 / Q15,  31250.0 / Q15,  31749.0 / Q15,  32653.0 / Q15,
    ],
    &[
        -27245.0 / Q15, -25062.0 / Q15, -23511.0 / Q15, -22105.0 / Q15,
        -20835.0 / Q15, -19700.0 / Q15, -18618.0 / Q15, -17528.0 / Q15,
        -16401.0 / Q15, -15323.0 / Q15, -14353.0 / Q15, -13347.0 / Q15,
        -12367.0 / Q15, -11374.0 / Q15, -10311.0 / Q15,  -9213.0 / Q15,
         -8120.0 / Q15,  -6994.0 / Q15,  -5799.0 / Q15,  -4628.0 / Q15,
         -3467.0 / Q15,  -2292.0 / Q15,  -1075.0 / Q15,    229.0 / Q15,
          1837.0 / Q15,   3545.0 / Q15,   5198.0 / Q15,   6876.0 / Q15,
          9008.0 / Q15,  11430.0 / Q15,  14471.0 / Q15,  18699.0 / Q15,
    ],
    &[
        -16768.0 / Q15, -11510.0 / Q15,  -8351.0 / Q15,  -5721.0 / Q15,
         -3640.0 / Q15,  -1877.0 / Q15,   -360.0 / Q15,    953.0 / Q15,
          2142.0 / Q15,   3245.0 / Q15,   4358.0 / Q15,   5421.0 / Q15,
          6471.0 / Q15,   7435.0 / Q15,   8430.0 / Q15,   9452.0 / Q15,
         10460.0 / Q15,  11482.0 / Q15,  12488.0 / Q15,  13538.0 / Q15,
         14559.0 / Q15,  15574.0 / Q15,  16670.0 / Q15,  17779.0 / Q15,
         18959.0 / Q15,  20008.0 / Q15,  21092.0 / Q15,  22355.0 / Q15,
         23659.0 / Q15,  25210.0 / Q15,  26952.0 / Q15,  28709.0 / Q15,
    ],
    &[
        -21421.0 / Q15, -17381.0 / Q15, -14380.0 / Q15, -11962.0 / Q15,
         -9878.0 / Q15,  -7929.0 / Q15,  -6147.0 / Q15,  -4417.0 / Q15,
         -2648.0 / Q15,   -832.0 / Q15,    999.0 / Q15,   3151.0 / Q15,
          5634.0 / Q15,   8570.0 / Q15,  12739.0 / Q15,  19532.0 / Q15,
    ],
    &[
         -9634.0 / Q15,  -5007.0 / Q15,  -1968.0 / Q15,    390.0 / Q15,
          2426.0 / Q15,   4040.0 / Q15,   5534.0 / Q15,   7026.0 / Q15,
          8462.0 / Q15,   9971.0 / Q15,  11439.0 / Q15,  13122.0 / Q15,
         15009.0 / Q15,  17233.0 / Q15,  19802.0 / Q15,  23045.0 / Q15,
    ],
    &[
        -20451.0 / Q15, -17085.0 / Q15, -14483.0 / Q15, -12014.0 / Q15,
         -9734.0 / Q15,  -7827.0 / Q15,  -6140.0 / Q15,  -4573.0 / Q15,
         -2997.0 / Q15,  -1445.0 / Q15,    141.0 / Q15,   1890.0 / Q15,
          3981.0 / Q15,   6436.0 / Q15,   9373.0 / Q15,  13642.0 / Q15,
    ],
    &[
        -12322.0 / Q15,  -8437.0 / Q15,  -5747.0 / Q15,  -3591.0 / Q15,
         -1824.0 / Q15,   -328.0 / Q15,   1032.0 / Q15,   2374.0 / Q15,
          3614.0 / Q15,   4945.0 / Q15,   6266.0 / Q15,   7773.0 / Q15,
          9511.0 / Q15,  11663.0 / Q15,  14247.0 / Q15,  18179.0 / Q15,
    ],
    &[
        -17094.0 / Q15, -12340.0 / Q15,  -8649.0 / Q15,  -5469.0 / Q15,
         -2609.0 / Q15,    226.0 / Q15,   3473.0 / Q15,   8085.0 / Q15,
    ],
    &[
         -8037.0 / Q15,  -3630.0 / Q15,   -698.0 / Q15,   1720.0 / Q15,
          4053.0 / Q15,   6449.0 / Q15,   9144.0 / Q15,  12718.0 / Q15,
    ],
];

/// Energy-ratio ladder for selecting the codebook gain power. The ladder is
/// walked top to bottom; the first row whose ratio, scaled by the current
/// gain energy, falls below the previous gain energy supplies the power.
pub const CODEBOOK_GAIN_POWER_RATIOS_AND_VALUES: [(f32, f32); 15] = [
    ( 32190.0 / Q15, 0.92),
    ( 31482.0 / Q15, 0.90),
    ( 30775.0 / Q15, 0.88),
    ( 29890.0 / Q15, 0.86),
    ( 28829.0 / Q15, 0.83),
    ( 27415.0 / Q15, 0.80),
    ( 25646.0 / Q15, 0.75),
    ( 23877.0 / Q15, 0.70),
    ( 22109.0 / Q15, 0.65),
    ( 19456.0 / Q15, 0.60),
    ( 15919.0 / Q15, 0.50),
    ( 12381.0 / Q15, 0.40),
    (  7960.0 / Q15, 0.30),
    (  2654.0 / Q15, 0.15),
    ( -1768.0 / Q15, 0.00),
];

/// Gain power used when the energy ratio exceeds every ladder entry.
pub const FALLBACK_CODEBOOK_GAIN_POWER: f32 = -0.10;

/// Fixed codebook vectors: four consecutive excitation values per entry,
/// selected by the 5-bit codebook index read for every group of four output
/// samples.
pub const CODEBOOK_VECTOR_TABLE: [[f32; 4]; 32] = [
    [ 22121.0 / Q12,  15251.0 / Q12, -22182.0 / Q12,   8509.0 / Q12],
    [ 26649.0 / Q12, -15167.0 / Q12,   4834.0 / Q12,   -632.0 / Q12],
    [-11594.0 / Q12,   9911.0 / Q12,  -8591.0 / Q12,   9190.0 / Q12],
    [ -2125.0 / Q12,   -653.0 / Q12,  21205.0 / Q12,  29253.0 / Q12],
    [  7904.0 / Q12,   7263.0 / Q12, -16050.0 / Q12, -10413.0 / Q12],
    [  3831.0 / Q12,  28808.0 / Q12,   5596.0 / Q12, -29133.0 / Q12],
    [ -9213.0 / Q12,  18548.0 / Q12,  -6515.0 / Q12,  -1558.0 / Q12],
    [ 13657.0 / Q12,  20022.0 / Q12,  24688.0 / Q12,  13796.0 / Q12],
    [ 10801.0 / Q12,   1688.0 / Q12,  -7373.0 / Q12,   1157.0 / Q12],
    [  8148.0 / Q12,  -6858.0 / Q12,   -914.0 / Q12,   -631.0 / Q12],
    [  2195.0 / Q12,  -1658.0 / Q12,  -8843.0 / Q12,   5367.0 / Q12],
    [  2494.0 / Q12,  -4885.0 / Q12,   -730.0 / Q12,   6115.0 / Q12],
    [  2550.0 / Q12,   3187.0 / Q12,  -6035.0 / Q12,  -4193.0 / Q12],
    [  3413.0 / Q12,   8036.0 / Q12,  -2000.0 / Q12,  -9696.0 / Q12],
    [ -5193.0 / Q12,  -2796.0 / Q12,  -3195.0 / Q12,   3049.0 / Q12],
    [ -2872.0 / Q12,   3263.0 / Q12,   7075.0 / Q12,   4588.0 / Q12],
    [ 12433.0 / Q12, -10905.0 / Q12, -17041.0 / Q12,   9587.0 / Q12],
    [ 12117.0 / Q12,  -7497.0 / Q12,   1951.0 / Q12,   4792.0 / Q12],
    [    69.0 / Q12,   9261.0 / Q12,  -9186.0 / Q12,   6728.0 / Q12],
    [  4103.0 / Q12,   1405.0 / Q12,   6634.0 / Q12,  12567.0 / Q12],
    [ 10913.0 / Q12,   3169.0 / Q12,   1228.0 / Q12,   1750.0 / Q12],
    [  2216.0 / Q12,  11248.0 / Q12,   7320.0 / Q12,  -8561.0 / Q12],
    [   764.0 / Q12,   8030.0 / Q12,   1943.0 / Q12,   3537.0 / Q12],
    [  9229.0 / Q12,   8364.0 / Q12,   9223.0 / Q12,   4193.0 / Q12],
    [  6276.0 / Q12,   -643.0 / Q12,   -128.0 / Q12,   -786.0 / Q12],
    [  4878.0 / Q12,  -5668.0 / Q12,   6503.0 / Q12,   -423.0 / Q12],
    [  2731.0 / Q12,    682.0 / Q12,  -3006.0 / Q12,   2809.0 / Q12],
    [  4026.0 / Q12,    582.0 / Q12,   2227.0 / Q12,   4704.0 / Q12],
    [  1744.0 / Q12,  -2621.0 / Q12,   1597.0 / Q12,     -3.0 / Q12],
    [  3199.0 / Q12,  -1886.0 / Q12,   3758.0 / Q12,  -5391.0 / Q12],
    [ -1593.0 / Q12,   1084.0 / Q12,   1869.0 / Q12,   2347.0 / Q12],
    [   560.0 / Q12,   3429.0 / Q12,    782.0 / Q12,    179.0 / Q12],
];

/// Additive gain level delta, on the -32 to +28 dB scale, applied after each
/// codebook step. Indexed by the same 5-bit codebook index as
/// `CODEBOOK_VECTOR_TABLE`.
pub const CODEBOOK_DELTA_GAIN: [f32; 32] = [
     105070.0 / Q13,   94805.0 / Q13,   62695.0 / Q13,  105725.0 / Q13,
      70090.0 / Q13,  115500.0 / Q13,   69535.0 / Q13,  107755.0 / Q13,
      34145.0 / Q13,   19055.0 / Q13,   19030.0 / Q13,     475.0 / Q13,
       1835.0 / Q13,   33945.0 / Q13,   -7540.0 / Q13,   10440.0 / Q13,
      81100.0 / Q13,   43790.0 / Q13,   41495.0 / Q13,   42360.0 / Q13,
      24525.0 / Q13,   47950.0 / Q13,    6845.0 / Q13,   47880.0 / Q13,
     -18025.0 / Q13,   13610.0 / Q13,  -35345.0 / Q13,  -15315.0 / Q13,
     -59900.0 / Q13,   -5825.0 / Q13,  -59185.0 / Q13,  -59185.0 / Q13,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_lsf_rows_match_index_widths() {
        for (row, &width) in LSF_TABLE.iter().zip(&LSF_INDEX_BITS) {
            assert_eq!(row.len(), 1 << width);
        }

        assert_eq!(LSF_INDEX_BITS.iter().sum::<u32>(), 46);
    }

    #[test]
    fn verify_gain_power_ladder_descends() {
        for pair in CODEBOOK_GAIN_POWER_RATIOS_AND_VALUES.windows(2) {
            assert!(pair[0].0 > pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
    }

    #[test]
    fn verify_gain_powers_are_the_documented_set() {
        let powers = [
            0.92, 0.90, 0.88, 0.86, 0.83, 0.80, 0.75, 0.70, 0.65, 0.60, 0.50, 0.40, 0.30, 0.15,
            0.00,
        ];

        for (&(_, power), &expected) in
            CODEBOOK_GAIN_POWER_RATIOS_AND_VALUES.iter().zip(powers.iter())
        {
            assert_eq!(power, expected);
        }

        assert_eq!(FALLBACK_CODEBOOK_GAIN_POWER, -0.10);
    }

    #[test]
    fn verify_table_entries_are_exact_quotients() {
        // Spot values against the reference fixed-point entries.
        assert_eq!(SUBFRAME_LAG_COEFFICIENTS[0], [0.0; 3]);
        assert_eq!(SUBFRAME_LAG_COEFFICIENTS[1][0] * 32768.0, 3003.0);
        assert_eq!(LSF_TABLE[0][0] * 32768.0, -32651.0);
        assert_eq!(LSF_TABLE[9][7] * 32768.0, 12718.0);
        assert_eq!(CODEBOOK_VECTOR_TABLE[31][1] * 4096.0, 3429.0);
        assert_eq!(CODEBOOK_DELTA_GAIN[0] * 8192.0, 105070.0);
        assert_eq!(CODEBOOK_DELTA_GAIN[31] * 8192.0, -59185.0);
    }
}
