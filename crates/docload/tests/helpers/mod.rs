//! Shared fixtures for integration tests.

use std::path::Path;

/// Write a minimal valid single-page PDF with "Hello PDF" as its text layer.
pub fn write_sample_pdf(path: &Path) {
    let body = concat!(
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n",
        "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n",
        "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] ",
        "/Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>\nendobj\n",
        "4 0 obj\n<< /Length 40 >>\nstream\n",
        "BT /F1 24 Tf 10 100 Td (Hello PDF) Tj ET\n",
        "endstream\nendobj\n",
        "5 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
    );

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = vec![0usize; 6];
    for (index, chunk) in body.split_inclusive("endobj\n").enumerate() {
        offsets[index + 1] = pdf.len();
        pdf.push_str(chunk);
    }

    let xref_start = pdf.len();
    pdf.push_str("xref\n0 6\n0000000000 65535 f \n");
    for offset in &offsets[1..] {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Root 1 0 R /Size 6 >>\nstartxref\n{}\n%%EOF\n",
        xref_start
    ));

    std::fs::write(path, pdf.into_bytes()).unwrap();
}
