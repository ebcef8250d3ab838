use rust_xlsxwriter::Workbook;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const MONTHS: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio",
    "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
];

// Raw headers as they appear in the source workbook: accents, line breaks,
// stray spaces and one duplicate (`Período` collapses onto `PERIODO`).
const HEADERS: [&str; 14] = [
    "PERIODO",
    "Trimestre",
    "Mes",
    "Tipo de\nAcreedor",
    "Nombre del  Acreedor",
    "Deudor",
    "N_PRESTAMOS",
    "Saldo Inicial",
    "Desembolsos",
    "Principal\r\nReembolsado",
    "Intereses Pagados",
    "Comisiones Pagadas",
    "Saldo Final",
    "Período",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let creditors = [
        ("Multilateral", "BID"),
        ("Multilateral", "Banco Mundial"),
        ("Multilateral", "CAF"),
        ("Bilateral", "China Development Bank"),
        ("Bonos", "Tenedores de Bonos"),
    ];
    let debtors = ["Gobierno Central", "Resto del Sector Público"];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .expect("Failed to write header");
    }

    let mut row: u32 = 1;
    for year in 2020..=2025 {
        // Source data runs through June 2025.
        let last_month = if year == 2025 { 6 } else { 12 };
        for month in 1..=last_month {
            for &(kind, creditor) in &creditors {
                let debtor = rng.pick(&debtors);
                let loans = 1 + rng.next_u64() % 12;

                let opening = (rng.next_f64() * 900_000_000.0).round() / 100.0;
                let disbursed = (rng.next_f64() * 50_000_000.0).round() / 100.0;
                let repaid = (rng.next_f64() * 40_000_000.0).round() / 100.0;
                let interest = (rng.next_f64() * 8_000_000.0).round() / 100.0;
                let fees = (rng.next_f64() * 100_000.0).round() / 100.0;
                let closing = opening + disbursed - repaid;

                sheet.write_number(row, 0, year as f64).expect("write");
                let quarter = format!("T{}", (month - 1) / 3 + 1);
                sheet.write_string(row, 1, quarter.as_str()).expect("write");
                // Free-text month entries, as typed by hand.
                let month_name = MONTHS[month - 1];
                let month_text = if rng.next_f64() < 0.3 {
                    format!(" {} ", month_name.to_lowercase())
                } else {
                    month_name.to_string()
                };
                sheet.write_string(row, 2, month_text.as_str()).expect("write");
                sheet.write_string(row, 3, kind).expect("write");
                sheet.write_string(row, 4, creditor).expect("write");
                sheet.write_string(row, 5, debtor).expect("write");
                sheet.write_number(row, 6, loans as f64).expect("write");
                sheet.write_number(row, 7, opening).expect("write");

                // Dirty cells: blanks and annotations in numeric columns.
                let r = rng.next_f64();
                if r < 0.05 {
                    sheet.write_string(row, 8, "s/d").expect("write");
                } else if r > 0.10 {
                    sheet.write_number(row, 8, disbursed).expect("write");
                }

                sheet.write_number(row, 9, repaid).expect("write");
                sheet.write_number(row, 10, interest).expect("write");
                sheet.write_number(row, 11, fees).expect("write");
                sheet.write_number(row, 12, closing).expect("write");
                sheet.write_number(row, 13, 1900.0).expect("write");
                row += 1;
            }
        }
    }

    let output_path = "Base Plana 20-25.xlsx";
    workbook.save(output_path).expect("Failed to write workbook");

    println!("Wrote {} debt records to {output_path}", row - 1);
}
