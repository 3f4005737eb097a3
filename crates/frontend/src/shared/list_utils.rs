//! Утилиты для списков, уже загруженных с сервера (поиск, сортировка, страницы)
use std::cmp::Ordering;

/// Минимальная длина поискового запроса
pub const MIN_FILTER_LEN: usize = 3;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу (в нижнем регистре)
    fn matches_filter(&self, filter_lower: &str) -> bool;
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Активен ли фильтр (короткие запросы игнорируются)
pub fn is_filter_active(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_FILTER_LEN
}

/// Сортирует список по указанному полю (стабильно)
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Фильтрует список по поисковому запросу
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if !is_filter_active(filter) {
        return items;
    }
    let filter_lower = filter.trim().to_lowercase();
    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter_lower))
        .collect()
}

/// Количество страниц (минимум одна)
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_count.div_ceil(page_size).max(1)
}

/// Срез текущей страницы (страницы с нуля; за пределами списка пусто)
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page_size == 0 {
        return items.to_vec();
    }
    items
        .iter()
        .skip(page.saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect()
}

/// Индикатор направления сортировки для заголовка колонки
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field != field {
        ""
    } else if ascending {
        " ▲"
    } else {
        " ▼"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        amount: i32,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter_lower: &str) -> bool {
            self.name.to_lowercase().contains(filter_lower)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "amount" => self.amount.cmp(&other.amount),
                _ => self.name.cmp(other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Lamp", amount: 30 },
            Row { name: "Desk", amount: 120 },
            Row { name: "Desk lamp", amount: 45 },
        ]
    }

    #[test]
    fn test_filter_needs_three_chars() {
        assert_eq!(filter_list(rows(), "la").len(), 3);
        let found = filter_list(rows(), "LAMP");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|r| r.name.to_lowercase().contains("lamp")));
    }

    #[test]
    fn test_sort_both_directions() {
        let mut items = rows();
        sort_list(&mut items, "amount", true);
        assert_eq!(items.iter().map(|r| r.amount).collect::<Vec<_>>(), vec![30, 45, 120]);
        sort_list(&mut items, "name", false);
        assert_eq!(items[0].name, "Lamp");
    }

    #[test]
    fn test_pagination() {
        let items: Vec<usize> = (0..45).collect();
        assert_eq!(total_pages(items.len(), 20), 3);
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(paginate(&items, 2, 20), (40..45).collect::<Vec<_>>());
        assert!(paginate(&items, 5, 20).is_empty());
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("total", "code", true), "");
        assert_eq!(get_sort_indicator("total", "total", true), " ▲");
        assert_eq!(get_sort_indicator("total", "total", false), " ▼");
    }
}
