use anyhow::{anyhow, Result};
use contracts::dashboards::d410_seller_overview::RevenuePoint;
use contracts::domain::catalog::Product;
use contracts::domain::orders::Order;
use contracts::reports::r510_seller_report::{ReportSection, StatusCount, TopCustomerEntry};
use contracts::shared::period::ResolvedPeriod;
use umya_spreadsheet::Worksheet;

/// Everything the builders need, already aggregated. Sheets for sections
/// with no rows are skipped entirely.
pub struct ReportData {
    pub shop_name: String,
    pub period: ResolvedPeriod,
    /// Label/value pairs; values pre-formatted for display
    pub summary: Vec<(String, String)>,
    pub sections: Vec<ReportSection>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub top_customers: Vec<TopCustomerEntry>,
    pub daily_revenue: Vec<RevenuePoint>,
    pub status_breakdown: Vec<StatusCount>,
}

const SUMMARY_SHEET: &str = "Tổng quan";
const GUEST_LABEL: &str = "Khách vãng lai";

/// Build the workbook: one summary sheet of display values, then one
/// sheet of raw-number data rows per requested non-empty section.
pub fn build_xlsx(data: &ReportData) -> Result<Vec<u8>> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    {
        let sheet = new_sheet(&mut book, SUMMARY_SHEET)?;
        set_text(sheet, 1, 1, "Báo cáo bán hàng");
        set_text(sheet, 1, 2, &data.shop_name);
        set_text(sheet, 1, 3, &period_label(&data.period));
        let mut row = 5;
        for (label, value) in &data.summary {
            set_text(sheet, 1, row, label);
            set_text(sheet, 2, row, value);
            row += 1;
        }
    }

    for section in &data.sections {
        match section {
            ReportSection::Orders if !data.orders.is_empty() => {
                let sheet = new_sheet(&mut book, section.sheet_title())?;
                write_header(
                    sheet,
                    &["Mã đơn", "Khách hàng", "Trạng thái", "Thanh toán", "Ngày tạo", "Tổng tiền"],
                );
                for (i, order) in data.orders.iter().enumerate() {
                    let row = i as u32 + 2;
                    set_text(sheet, 1, row, &order.id);
                    set_text(
                        sheet,
                        2,
                        row,
                        order.customer_name.as_deref().unwrap_or(GUEST_LABEL),
                    );
                    set_text(sheet, 3, row, order.status.display_name());
                    set_text(sheet, 4, row, &order.payment_method);
                    set_text(
                        sheet,
                        5,
                        row,
                        &order.created_at.format("%d/%m/%Y %H:%M").to_string(),
                    );
                    set_number(sheet, 6, row, order.final_total);
                }
            }
            ReportSection::Products if !data.products.is_empty() => {
                let sheet = new_sheet(&mut book, section.sheet_title())?;
                write_header(
                    sheet,
                    &["Tên sản phẩm", "Danh mục", "Giá", "Tồn kho", "Đã bán"],
                );
                for (i, product) in data.products.iter().enumerate() {
                    let row = i as u32 + 2;
                    set_text(sheet, 1, row, &product.name);
                    set_text(
                        sheet,
                        2,
                        row,
                        product.category_name.as_deref().unwrap_or(""),
                    );
                    set_number(sheet, 3, row, product.price);
                    set_number(sheet, 4, row, product.quantity as f64);
                    set_number(sheet, 5, row, product.total_sold as f64);
                }
            }
            ReportSection::TopCustomers if !data.top_customers.is_empty() => {
                let sheet = new_sheet(&mut book, section.sheet_title())?;
                write_header(sheet, &["Khách hàng", "Số đơn", "Tổng chi tiêu"]);
                for (i, customer) in data.top_customers.iter().enumerate() {
                    let row = i as u32 + 2;
                    set_text(sheet, 1, row, &customer.name);
                    set_number(sheet, 2, row, customer.orders as f64);
                    set_number(sheet, 3, row, customer.total_spent);
                }
            }
            ReportSection::DailyRevenue if !data.daily_revenue.is_empty() => {
                let sheet = new_sheet(&mut book, section.sheet_title())?;
                write_header(sheet, &["Ngày", "Doanh thu", "Lợi nhuận", "Số đơn"]);
                for (i, point) in data.daily_revenue.iter().enumerate() {
                    let row = i as u32 + 2;
                    set_text(sheet, 1, row, &point.date.format("%d/%m/%Y").to_string());
                    set_number(sheet, 2, row, point.revenue);
                    set_number(sheet, 3, row, point.profit);
                    set_number(sheet, 4, row, point.order_count as f64);
                }
            }
            ReportSection::StatusBreakdown if !data.status_breakdown.is_empty() => {
                let sheet = new_sheet(&mut book, section.sheet_title())?;
                write_header(sheet, &["Trạng thái", "Số đơn", "Doanh thu"]);
                for (i, status) in data.status_breakdown.iter().enumerate() {
                    let row = i as u32 + 2;
                    set_text(sheet, 1, row, &status.status);
                    set_number(sheet, 2, row, status.orders as f64);
                    set_number(sheet, 3, row, status.revenue);
                }
            }
            _ => {}
        }
    }

    let mut out: Vec<u8> = Vec::new();
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out)
        .map_err(|e| anyhow!("failed to serialize workbook: {e}"))?;
    Ok(out)
}

/// Same content as the workbook, flattened into one CSV stream with a
/// title row per section.
pub fn build_csv(data: &ReportData) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    let period = period_label(&data.period);
    writer.write_record(["Báo cáo bán hàng", data.shop_name.as_str()])?;
    writer.write_record(["Kỳ báo cáo", period.as_str()])?;
    writer.write_record([SUMMARY_SHEET])?;
    for (label, value) in &data.summary {
        writer.write_record([label.as_str(), value.as_str()])?;
    }

    for section in &data.sections {
        match section {
            ReportSection::Orders if !data.orders.is_empty() => {
                writer.write_record([""])?;
                writer.write_record([section.sheet_title()])?;
                writer.write_record([
                    "Mã đơn", "Khách hàng", "Trạng thái", "Thanh toán", "Ngày tạo", "Tổng tiền",
                ])?;
                for order in &data.orders {
                    let created = order.created_at.format("%d/%m/%Y %H:%M").to_string();
                    let total = order.final_total.to_string();
                    writer.write_record([
                        order.id.as_str(),
                        order.customer_name.as_deref().unwrap_or(GUEST_LABEL),
                        order.status.display_name(),
                        order.payment_method.as_str(),
                        created.as_str(),
                        total.as_str(),
                    ])?;
                }
            }
            ReportSection::Products if !data.products.is_empty() => {
                writer.write_record([""])?;
                writer.write_record([section.sheet_title()])?;
                writer.write_record(["Tên sản phẩm", "Danh mục", "Giá", "Tồn kho", "Đã bán"])?;
                for product in &data.products {
                    let price = product.price.to_string();
                    let quantity = product.quantity.to_string();
                    let total_sold = product.total_sold.to_string();
                    writer.write_record([
                        product.name.as_str(),
                        product.category_name.as_deref().unwrap_or(""),
                        price.as_str(),
                        quantity.as_str(),
                        total_sold.as_str(),
                    ])?;
                }
            }
            ReportSection::TopCustomers if !data.top_customers.is_empty() => {
                writer.write_record([""])?;
                writer.write_record([section.sheet_title()])?;
                writer.write_record(["Khách hàng", "Số đơn", "Tổng chi tiêu"])?;
                for customer in &data.top_customers {
                    let orders = customer.orders.to_string();
                    let total_spent = customer.total_spent.to_string();
                    writer.write_record([
                        customer.name.as_str(),
                        orders.as_str(),
                        total_spent.as_str(),
                    ])?;
                }
            }
            ReportSection::DailyRevenue if !data.daily_revenue.is_empty() => {
                writer.write_record([""])?;
                writer.write_record([section.sheet_title()])?;
                writer.write_record(["Ngày", "Doanh thu", "Lợi nhuận", "Số đơn"])?;
                for point in &data.daily_revenue {
                    writer.write_record([
                        point.date.format("%d/%m/%Y").to_string(),
                        point.revenue.to_string(),
                        point.profit.to_string(),
                        point.order_count.to_string(),
                    ])?;
                }
            }
            ReportSection::StatusBreakdown if !data.status_breakdown.is_empty() => {
                writer.write_record([""])?;
                writer.write_record([section.sheet_title()])?;
                writer.write_record(["Trạng thái", "Số đơn", "Doanh thu"])?;
                for status in &data.status_breakdown {
                    let orders = status.orders.to_string();
                    let revenue = status.revenue.to_string();
                    writer.write_record([
                        status.status.as_str(),
                        orders.as_str(),
                        revenue.as_str(),
                    ])?;
                }
            }
            _ => {}
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush csv: {e}"))?;
    Ok(bytes)
}

fn period_label(period: &ResolvedPeriod) -> String {
    format!(
        "{} - {}",
        period.start.format("%d/%m/%Y"),
        period.end.format("%d/%m/%Y")
    )
}

fn new_sheet<'a>(
    book: &'a mut umya_spreadsheet::Spreadsheet,
    title: &str,
) -> Result<&'a mut Worksheet> {
    book.new_sheet(title)
        .map_err(|e| anyhow!("failed to create sheet {title}: {e}"))
}

fn write_header(sheet: &mut Worksheet, titles: &[&str]) {
    for (i, title) in titles.iter().enumerate() {
        set_text(sheet, i as u32 + 1, 1, title);
    }
}

fn set_text(sheet: &mut Worksheet, col: u32, row: u32, value: &str) {
    sheet.get_cell_mut((col, row)).set_value(value.to_string());
}

fn set_number(sheet: &mut Worksheet, col: u32, row: u32, value: f64) {
    sheet.get_cell_mut((col, row)).set_value_number(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::shared::period::ResolvedPeriod;

    fn sample_data(sections: Vec<ReportSection>) -> ReportData {
        let period = ResolvedPeriod::resolve_at(
            Some("7days"),
            None,
            None,
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        );
        ReportData {
            shop_name: "Shop Bách Hóa".to_string(),
            period,
            summary: vec![
                ("Tổng doanh thu (đã giao)".to_string(), "1,500,000 ₫".to_string()),
                ("Số đơn hàng".to_string(), "12".to_string()),
            ],
            sections,
            orders: vec![],
            products: vec![],
            top_customers: vec![TopCustomerEntry {
                customer_id: "c1".to_string(),
                name: "Trần Văn A".to_string(),
                orders: 3,
                total_spent: 900000.0,
            }],
            daily_revenue: vec![RevenuePoint {
                date: NaiveDate::from_ymd_opt(2025, 6, 24).unwrap(),
                revenue: 500000.0,
                profit: 110000.0,
                order_count: 4,
            }],
            status_breakdown: vec![],
        }
    }

    #[test]
    fn xlsx_skips_empty_sections() {
        let data = sample_data(ReportSection::all());
        let bytes = build_xlsx(&data).unwrap();
        assert!(!bytes.is_empty());

        let book =
            umya_spreadsheet::reader::xlsx::read_reader(std::io::Cursor::new(&bytes), true)
                .unwrap();
        assert!(book.get_sheet_by_name(SUMMARY_SHEET).is_some());
        assert!(book
            .get_sheet_by_name(ReportSection::TopCustomers.sheet_title())
            .is_some());
        assert!(book
            .get_sheet_by_name(ReportSection::DailyRevenue.sheet_title())
            .is_some());
        // no orders, products or status rows -> no sheets for them
        assert!(book
            .get_sheet_by_name(ReportSection::Orders.sheet_title())
            .is_none());
        assert!(book
            .get_sheet_by_name(ReportSection::StatusBreakdown.sheet_title())
            .is_none());
    }

    #[test]
    fn csv_contains_summary_and_requested_sections() {
        let data = sample_data(vec![ReportSection::TopCustomers]);
        let bytes = build_csv(&data).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Tổng doanh thu (đã giao)"));
        assert!(text.contains("Trần Văn A"));
        // daily revenue was not requested
        assert!(!text.contains("Lợi nhuận"));
    }
}
